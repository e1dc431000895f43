//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Top-level shape of a JSON analysis document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A single response object
    Object,
    /// An array of response pages or of bare blocks
    Array,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Object => write!(f, "JSON object"),
            InputFormat::Array => write!(f, "JSON array"),
        }
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes read from a file when sniffing its format.
const SNIFF_LEN: usize = 1024;

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use untextract::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("analysis.json").unwrap();
/// println!("Input: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from bytes.
///
/// # Returns
/// * `Ok(InputFormat)` if the first significant byte opens an object or array
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let first = strip_bom(data).iter().find(|b| !b.is_ascii_whitespace());

    match first {
        Some(b'{') => Ok(InputFormat::Object),
        Some(b'[') => Ok(InputFormat::Array),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like an analysis document.
pub fn is_json_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Strip a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_object_and_array() {
        assert_eq!(
            detect_format_from_bytes(b"  \n{\"Blocks\": []}").unwrap(),
            InputFormat::Object
        );
        assert_eq!(
            detect_format_from_bytes(b"[{\"Blocks\": []}]").unwrap(),
            InputFormat::Array
        );
    }

    #[test]
    fn test_detect_with_bom() {
        let data = b"\xEF\xBB\xBF{}";
        assert_eq!(detect_format_from_bytes(data).unwrap(), InputFormat::Object);
        assert_eq!(strip_bom(data), b"{}");
    }

    #[test]
    fn test_detect_rejects_non_json() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
        assert!(!is_json_bytes(b""));
        assert!(!is_json_bytes(b"   "));
    }

    #[test]
    fn test_detect_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        std::fs::write(&path, "{\"Blocks\": []}").unwrap();
        assert_eq!(detect_format_from_path(&path).unwrap(), InputFormat::Object);
    }
}
