//! Feature Record - Core data structure for classifier input
//!
//! **Versioned feature record with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::layout::{
    feature_index, layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::parse::ParsedUrl;

// ============================================================================
// VERSIONED FEATURE RECORD
// ============================================================================

/// Fixed-width record of URL features, ordered by `FEATURE_LAYOUT`.
///
/// Every canonical feature is always present: a fresh record is all zeros,
/// and extractors only overwrite the slots they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [u64; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Create a new zeroed record with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0; FEATURE_COUNT],
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<u64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: u64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: u64) -> bool {
        if let Some(index) = feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Set a 0/1 flag feature by name
    pub fn set_flag(&mut self, name: &str, on: bool) -> bool {
        self.set_by_name(name, u64::from(on))
    }

    /// Iterate `(name, value)` pairs in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Validate that this record is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Convert to JSON for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
        })
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized as an ordered `name -> value` map
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Input shared by all feature extractors
#[derive(Debug, Clone)]
pub struct UrlContext<'a> {
    /// The URL exactly as received
    pub raw: &'a str,
    /// `raw` lowercased once for keyword scans
    pub lowered: String,
    pub parsed: ParsedUrl,
}

impl<'a> UrlContext<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lowered: raw.to_lowercase(),
            parsed: ParsedUrl::parse(raw),
        }
    }
}

/// Trait for feature extractors
pub trait FeatureExtractor {
    /// Extract features and update the record
    fn extract(&self, url: &UrlContext<'_>, record: &mut FeatureRecord);
}

// ============================================================================
// TESTS
// ============================================================================
