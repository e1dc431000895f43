//! Worksheet naming.

use regex::Regex;
use std::collections::HashSet;

/// Longest worksheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Hands out sanitized, unique worksheet names for one workbook.
#[derive(Debug)]
pub struct SheetNamer {
    used: HashSet<String>,
    invalid: Regex,
}

impl SheetNamer {
    /// Create a namer with no names taken.
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
            invalid: Regex::new(r"[\[\]:*?/\\]").unwrap(),
        }
    }

    /// Sanitize a proposed name and make it unique within the workbook.
    ///
    /// Forbidden characters are removed, leading/trailing apostrophes are
    /// stripped, and the name is cut to 31 characters. Collisions (compared
    /// case-insensitively) get a `_2`, `_3`, ... suffix.
    pub fn claim(&mut self, proposed: &str) -> String {
        let cleaned = self.invalid.replace_all(proposed, "");
        let cleaned = cleaned.trim().trim_matches('\'');
        let base = if cleaned.is_empty() { "Sheet" } else { cleaned };
        let base = truncate(base, MAX_SHEET_NAME_LEN);

        let mut name = base.to_string();
        let mut n = 2;
        while self.used.contains(&name.to_lowercase()) {
            let suffix = format!("_{}", n);
            name = format!(
                "{}{}",
                truncate(base, MAX_SHEET_NAME_LEN - suffix.len()),
                suffix
            );
            n += 1;
        }

        self.used.insert(name.to_lowercase());
        name
    }
}

impl Default for SheetNamer {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_plain() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.claim("Table_1"), "Table_1");
        assert_eq!(namer.claim("Table_2"), "Table_2");
    }

    #[test]
    fn test_claim_sanitizes() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.claim("Q1/Q2 [draft]?"), "Q1Q2 draft");
        assert_eq!(namer.claim("'quoted'"), "quoted");
        assert_eq!(namer.claim("***"), "Sheet");
    }

    #[test]
    fn test_claim_deduplicates_case_insensitively() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.claim("Forms"), "Forms");
        assert_eq!(namer.claim("forms"), "forms_2");
        assert_eq!(namer.claim("Forms"), "Forms_3");
    }

    #[test]
    fn test_claim_truncates() {
        let mut namer = SheetNamer::new();
        let long = "x".repeat(40);
        let first = namer.claim(&long);
        assert_eq!(first.chars().count(), MAX_SHEET_NAME_LEN);

        let second = namer.claim(&long);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with("_2"));
    }
}
