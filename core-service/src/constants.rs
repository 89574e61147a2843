//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default model file (JSON export of the trained classifier)
pub const DEFAULT_MODEL_PATH: &str = "phishing_model.json";

/// Default feature column list (JSON array, training column order)
pub const DEFAULT_FEATURE_COLUMNS_PATH: &str = "feature_columns.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Phish Guard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get feature column path from environment or use default
pub fn get_feature_columns_path() -> String {
    std::env::var("FEATURE_COLUMNS_PATH")
        .unwrap_or_else(|_| DEFAULT_FEATURE_COLUMNS_PATH.to_string())
}

/// Expected SHA-256 of the model file, if set and non-empty
pub fn get_model_checksum() -> Option<String> {
    std::env::var("MODEL_SHA256")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get decision threshold from environment, if set and parseable
pub fn get_threshold() -> Option<f64> {
    std::env::var("PHISH_THRESHOLD")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}
