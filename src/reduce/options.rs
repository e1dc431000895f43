//! Reducer options and configuration.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// Options for reducing a document graph.
#[derive(Debug, Clone)]
pub struct ReduceOptions {
    /// Which extraction passes run
    pub features: Features,

    /// Page selection (which pages to reduce)
    pub pages: PageSelection,

    /// Unicode normalization applied to emitted text
    pub normalization: TextNormalization,

    /// Whether to reconstruct tables on the rayon pool
    pub parallel: bool,
}

impl ReduceOptions {
    /// Create new reduce options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction passes.
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Extract text lines only.
    pub fn text_only(mut self) -> Self {
        self.features = Features::TEXT;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set text normalization.
    pub fn with_normalization(mut self, normalization: TextNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enable or disable parallel table reconstruction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            features: Features::ALL,
            pages: PageSelection::All,
            normalization: TextNormalization::None,
            parallel: true,
        }
    }
}

/// Extraction passes, mirroring the feature types requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Collect LINE text
    pub text: bool,
    /// Collect key/value pairs
    pub forms: bool,
    /// Reconstruct tables
    pub tables: bool,
}

impl Features {
    /// Every pass.
    pub const ALL: Features = Features {
        text: true,
        forms: true,
        tables: true,
    };

    /// LINE text only.
    pub const TEXT: Features = Features {
        text: true,
        forms: false,
        tables: false,
    };

    /// Forms and tables, the combination the analysis job is started with.
    pub const FORMS_AND_TABLES: Features = Features {
        text: false,
        forms: true,
        tables: true,
    };
}

impl Default for Features {
    fn default() -> Self {
        Self::ALL
    }
}

/// Unicode normalization for emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextNormalization {
    /// Emit text exactly as recognized
    #[default]
    None,
    /// Canonical composition
    Nfc,
    /// Compatibility composition (folds full-width forms, ligatures, ...)
    Nfkc,
}

impl TextNormalization {
    /// Apply the normalization to a string.
    pub fn apply(&self, text: String) -> String {
        match self {
            TextNormalization::None => text,
            TextNormalization::Nfc => text.nfc().collect(),
            TextNormalization::Nfkc => text.nfkc().collect(),
        }
    }
}

/// Page selection for reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Reduce all pages
    #[default]
    All,
    /// Reduce a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Reduce specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check a block's optional page; blocks without a page always pass.
    pub fn includes_block_page(&self, page: Option<u32>) -> bool {
        page.map_or(true, |p| self.includes(p))
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = |msg: &str| Error::InvalidPageRange(format!("{}: {:?}", msg, s));

        // Check for simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("Invalid start page"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("Invalid end page"))?;
                if start > end {
                    return Err(invalid("Start page after end page"));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Parse comma-separated list with possible ranges
        let mut pages = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("Invalid page number"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("Invalid page number"))?;
                if start > end {
                    return Err(invalid("Start page after end page"));
                }
                pages.extend(start..=end);
            } else {
                let p: u32 = part.parse().map_err(|_| invalid("Invalid page number"))?;
                pages.insert(p);
            }
        }

        let pages = pages.into_iter().collect();
        Ok(PageSelection::Pages(pages))
    }
}
