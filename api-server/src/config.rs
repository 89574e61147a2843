//! Configuration module

use std::env;

use phishguard_core::{constants, ArtifactConfig, ThresholdConfig};

/// Origins allowed by default: the local UI and the browser extension
const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1,chrome-extension://";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Classifier artifact location
    pub artifact: ArtifactConfig,

    /// Decision threshold
    pub threshold: ThresholdConfig,

    /// Allowed CORS origin prefixes
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            artifact: ArtifactConfig::from_env(),

            threshold: threshold_from_env(),

            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
        }
    }

    /// Whether `origin` starts with one of the allowed prefixes
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.cors_origins.iter().any(|prefix| origin.starts_with(prefix.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            artifact: ArtifactConfig::default(),
            threshold: ThresholdConfig::default(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn threshold_from_env() -> ThresholdConfig {
    match constants::get_threshold() {
        None => ThresholdConfig::default(),
        Some(value) => ThresholdConfig::new(value).unwrap_or_else(|| {
            tracing::warn!("PHISH_THRESHOLD={} is outside (0, 1], using default", value);
            ThresholdConfig::default()
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
