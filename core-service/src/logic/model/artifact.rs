//! Classifier Artifact - model + expected column order
//!
//! Loaded once at startup from two JSON files exported by training:
//! the model file and the ordered feature-column list. Read-only after
//! loading and shared across all request handlers.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::constants;
use crate::logic::features::layout::validate_layout;
use super::classifier::{Classifier, ModelSpec};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

// ============================================================================
// CONFIG
// ============================================================================

/// Where to find the artifact files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
    /// Expected SHA-256 (hex) of the model file, if integrity is enforced
    pub expected_sha256: Option<String>,
}

impl ArtifactConfig {
    pub fn new(model_path: impl Into<PathBuf>, columns_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            columns_path: columns_path.into(),
            expected_sha256: None,
        }
    }

    pub fn with_checksum(mut self, sha256: impl Into<String>) -> Self {
        self.expected_sha256 = Some(sha256.into());
        self
    }

    /// Build from environment variables (see `constants`)
    pub fn from_env() -> Self {
        Self {
            model_path: constants::get_model_path().into(),
            columns_path: constants::get_feature_columns_path().into(),
            expected_sha256: constants::get_model_checksum(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::new(constants::DEFAULT_MODEL_PATH, constants::DEFAULT_FEATURE_COLUMNS_PATH)
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// On-disk model file: the model definition plus optional layout stamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,
    #[serde(flatten)]
    pub model: ModelSpec,
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub columns_path: String,
    pub model_type: String,
    pub feature_count: usize,
    pub sha256: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// ARTIFACT
// ============================================================================

pub struct ClassifierArtifact {
    classifier: Box<dyn Classifier>,
    expected_columns: Vec<String>,
    metadata: ModelMetadata,
}

impl fmt::Debug for ClassifierArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierArtifact")
            .field("model_type", &self.classifier.model_type())
            .field("expected_columns", &self.expected_columns)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl ClassifierArtifact {
    /// Wrap an in-memory classifier (no files involved)
    pub fn new(classifier: Box<dyn Classifier>, expected_columns: Vec<String>) -> Self {
        let metadata = ModelMetadata {
            model_path: "<memory>".to_string(),
            columns_path: "<memory>".to_string(),
            model_type: classifier.model_type().to_string(),
            feature_count: expected_columns.len(),
            sha256: None,
            loaded_at: Utc::now(),
        };

        Self {
            classifier,
            expected_columns,
            metadata,
        }
    }

    /// Load model + columns from disk and validate them against each other
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactLoadError> {
        log::info!("Loading classifier from: {}", config.model_path.display());

        let model_bytes = read_file(&config.model_path)?;
        let sha256 = hex::encode(Sha256::digest(&model_bytes));

        if let Some(expected) = &config.expected_sha256 {
            if !expected.trim().eq_ignore_ascii_case(&sha256) {
                return Err(ArtifactLoadError::ChecksumMismatch {
                    expected: expected.trim().to_string(),
                    actual: sha256,
                });
            }
            log::info!("Model checksum verified");
        }

        let model_file: ModelFile = serde_json::from_slice(&model_bytes).map_err(|source| {
            ArtifactLoadError::Parse {
                path: config.model_path.clone(),
                source,
            }
        })?;

        let columns_bytes = read_file(&config.columns_path)?;
        let expected_columns: Vec<String> =
            serde_json::from_slice(&columns_bytes).map_err(|source| ArtifactLoadError::Parse {
                path: config.columns_path.clone(),
                source,
            })?;

        validate_columns(&expected_columns)?;
        model_file
            .model
            .validate(expected_columns.len())
            .map_err(ArtifactLoadError::Invalid)?;

        if let (Some(version), Some(hash)) = (model_file.feature_version, model_file.layout_hash) {
            // Columns are reconciled by name, so a stale layout still works
            if let Err(e) = validate_layout(version, hash) {
                log::warn!("{} - columns will be reconciled by name", e);
            }
        }

        let metadata = ModelMetadata {
            model_path: config.model_path.display().to_string(),
            columns_path: config.columns_path.display().to_string(),
            model_type: model_file.model.model_type().to_string(),
            feature_count: expected_columns.len(),
            sha256: Some(sha256),
            loaded_at: Utc::now(),
        };

        log::info!(
            "Classifier loaded: {} with {} feature columns",
            metadata.model_type,
            metadata.feature_count
        );

        Ok(Self {
            classifier: Box::new(model_file.model),
            expected_columns,
            metadata,
        })
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Column order the classifier was trained on
    pub fn expected_columns(&self) -> &[String] {
        &self.expected_columns
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ArtifactLoadError> {
    fs::read(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_columns(columns: &[String]) -> Result<(), ArtifactLoadError> {
    if columns.is_empty() {
        return Err(ArtifactLoadError::Invalid("feature column list is empty".to_string()));
    }

    for (i, column) in columns.iter().enumerate() {
        if columns[..i].contains(column) {
            return Err(ArtifactLoadError::Invalid(format!("duplicate feature column '{}'", column)));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
