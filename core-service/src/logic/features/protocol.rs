//! Protocol Feature Extraction
//!
//! Transport scheme and characters used to disguise the real host.

use super::vector::{FeatureExtractor, FeatureRecord, UrlContext};

/// Scheme and special-character features
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolFeatures;

impl ProtocolFeatures {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureExtractor for ProtocolFeatures {
    fn extract(&self, url: &UrlContext<'_>, record: &mut FeatureRecord) {
        // No parsed scheme counts as not-https
        record.set_flag("is_https", url.parsed.is_https());

        record.set_flag("has_at_symbol", url.raw.contains('@'));
        record.set_flag("has_encoded_chars", url.raw.contains('%'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(url: &str) -> FeatureRecord {
        let mut record = FeatureRecord::new();
        ProtocolFeatures::new().extract(&UrlContext::new(url), &mut record);
        record
    }

    #[test]
    fn test_is_https() {
        assert_eq!(run("http://x.com").get_by_name("is_https"), Some(0));
        assert_eq!(run("https://x.com").get_by_name("is_https"), Some(1));
        assert_eq!(run("HTTPS://x.com").get_by_name("is_https"), Some(1));
        assert_eq!(run("ftp://x.com").get_by_name("is_https"), Some(0));
        assert_eq!(run("x.com").get_by_name("is_https"), Some(0));
        assert_eq!(run("https://[::1").get_by_name("is_https"), Some(0));
    }

    #[test]
    fn test_special_characters() {
        let record = run("http://paypal.com@evil.tk/%2e%2e");
        assert_eq!(record.get_by_name("has_at_symbol"), Some(1));
        assert_eq!(record.get_by_name("has_encoded_chars"), Some(1));

        let record = run("https://example.com");
        assert_eq!(record.get_by_name("has_at_symbol"), Some(0));
        assert_eq!(record.get_by_name("has_encoded_chars"), Some(0));
    }
}
