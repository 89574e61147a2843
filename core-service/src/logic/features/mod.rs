//! Features Module - URL Feature Extraction Engine
//!
//! Turns a raw URL into the fixed-width `FeatureRecord` the classifier
//! consumes. Pure and deterministic: no I/O, never fails.

pub mod layout;
pub mod parse;
pub mod vector;
pub mod lexical;
pub mod domain;
pub mod keywords;
pub mod protocol;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo};
pub use parse::ParsedUrl;
pub use vector::{FeatureExtractor, FeatureRecord, UrlContext};

use domain::DomainFeatures;
use keywords::KeywordFeatures;
use lexical::LexicalFeatures;
use protocol::ProtocolFeatures;

/// Extract the canonical feature record from a raw URL.
///
/// Each extractor fills the slots it owns; slots no extractor touched keep
/// their zero default, so the record is always complete.
pub fn extract_url_features(url: &str) -> FeatureRecord {
    let context = UrlContext::new(url);
    let mut record = FeatureRecord::new();

    let extractors: [&dyn FeatureExtractor; 4] = [
        &LexicalFeatures,
        &DomainFeatures,
        &KeywordFeatures,
        &ProtocolFeatures,
    ];
    for extractor in extractors {
        extractor.extract(&context, &mut record);
    }

    if !context.parsed.ok {
        log::debug!("URL could not be split, using degraded fields: {:?}", url);
    }

    record
}
