//! Source format list handling
//!
//! Users pass formats either as repeated options or comma joined
//! (`--files-format png,jpg --files-format JPEG`). This module turns that
//! into the ordered, de-duplicated, lowercase extension list the discoverer
//! scans for.

use crate::constants::{DEFAULT_SOURCE_FORMATS, TARGET_EXTENSION};

/// Normalizes raw format arguments into lowercase extensions.
///
/// Order of first appearance is kept. A leading dot is stripped so `.png`
/// and `png` are the same entry. Empty input falls back to
/// [`DEFAULT_SOURCE_FORMATS`].
pub fn normalize_formats<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut formats: Vec<String> = Vec::new();

    for entry in raw {
        for part in entry.as_ref().split(',') {
            let ext = part.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !formats.contains(&ext) {
                formats.push(ext);
            }
        }
    }

    if formats.is_empty() {
        return default_formats();
    }
    formats
}

pub fn default_formats() -> Vec<String> {
    DEFAULT_SOURCE_FORMATS.iter().map(|s| s.to_string()).collect()
}

/// Extension every output file gets, regardless of the source casing.
pub fn target_extension() -> &'static str {
    TARGET_EXTENSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_comma_joined() {
        let raw = vec!["png, JPG".to_string(), "jpeg".to_string()];
        assert_eq!(normalize_formats(&raw), vec!["png", "jpg", "jpeg"]);
    }

    #[test]
    fn test_normalize_deduplicates_case_variants() {
        let raw = ["png", "PNG", ".png", "gif"];
        assert_eq!(normalize_formats(&raw), vec!["png", "gif"]);
    }

    #[test]
    fn test_normalize_skips_empty_parts() {
        let raw = ["png,,", " , bmp"];
        assert_eq!(normalize_formats(&raw), vec!["png", "bmp"]);
    }

    #[test]
    fn test_normalize_defaults_when_empty() {
        let raw: [&str; 0] = [];
        assert_eq!(normalize_formats(&raw), vec!["jpg", "jpeg", "png"]);

        let raw = [" , "];
        assert_eq!(normalize_formats(&raw), vec!["jpg", "jpeg", "png"]);
    }

    #[test]
    fn test_target_extension() {
        assert_eq!(target_extension(), "webp");
    }
}
