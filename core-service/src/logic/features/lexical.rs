//! Lexical Feature Extraction
//!
//! Lengths and character counts over the raw URL and its parsed parts.

use super::vector::{FeatureExtractor, FeatureRecord, UrlContext};

/// Length and character-count features
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalFeatures;

impl LexicalFeatures {
    pub fn new() -> Self {
        Self
    }
}

/// Number of occurrences of `needle` in `haystack`
pub(crate) fn count_char(haystack: &str, needle: char) -> u64 {
    haystack.chars().filter(|&c| c == needle).count() as u64
}

impl FeatureExtractor for LexicalFeatures {
    fn extract(&self, url: &UrlContext<'_>, record: &mut FeatureRecord) {
        let raw = url.raw;

        // Lengths are in characters, not bytes
        record.set_by_name("url_length", raw.chars().count() as u64);
        record.set_by_name("domain_length", url.parsed.domain.chars().count() as u64);
        record.set_by_name("path_length", url.parsed.path.chars().count() as u64);

        record.set_by_name("num_dots", count_char(raw, '.'));
        record.set_by_name("num_hyphens", count_char(raw, '-'));
        record.set_by_name("num_slashes", count_char(raw, '/'));
        record.set_by_name(
            "num_digits",
            raw.chars().filter(char::is_ascii_digit).count() as u64,
        );
    }
}
