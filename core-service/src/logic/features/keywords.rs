//! Keyword Feature Extraction
//!
//! Substring scans for credential lures, impersonated brands and link
//! shorteners. All matching is on lowercased text.

use super::vector::{FeatureExtractor, FeatureRecord, UrlContext};

/// Words phishing pages put in their URLs to look like a login flow
pub const PHISHING_KEYWORDS: &[&str] = &[
    "login", "secure", "account", "verify", "update", "bank",
    "confirm", "signin", "webscr", "paypal", "amazon", "apple",
];

/// Brands commonly impersonated inside the path of an unrelated host
pub const BRANDS: &[&str] = &["paypal", "google", "amazon", "facebook", "apple", "microsoft"];

/// Link shortener domains (substring match)
pub const SHORTENERS: &[&str] = &["bit.ly", "tinyurl", "goo.gl", "t.co", "ow.ly", "is.gd", "buff.ly"];

/// Keyword, brand and shortener features
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFeatures;

impl KeywordFeatures {
    pub fn new() -> Self {
        Self
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

impl FeatureExtractor for KeywordFeatures {
    fn extract(&self, url: &UrlContext<'_>, record: &mut FeatureRecord) {
        let path = url.parsed.path.to_lowercase();

        record.set_flag("phishing_keyword", contains_any(&url.lowered, PHISHING_KEYWORDS));
        record.set_flag("brand_in_path", contains_any(&path, BRANDS));
        record.set_flag("is_shortened", contains_any(&url.lowered, SHORTENERS));
    }
}
