//! Inference Engine - URL → Verdict
//!
//! Owns the classifier artifact for the process lifetime. The artifact is
//! built before any request is served and never mutated afterwards, so
//! `predict` needs no locking; only the latency counters are shared, and
//! those are atomics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::features::{extract_url_features, FeatureRecord};
use super::artifact::{ArtifactConfig, ArtifactLoadError, ClassifierArtifact};
use super::classifier::{ClassifierError, POSITIVE_CLASS};
use super::threshold::{risk_score, round_confidence, ThresholdConfig};
use super::verdict::{PredictErrorKind, Prediction, Verdict};

// ============================================================================
// COLUMN RECONCILIATION
// ============================================================================

/// Feature row ordered exactly as the classifier expects
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow<'a> {
    pub values: Vec<f64>,
    /// Expected columns the extractor does not produce (filled with 0)
    pub missing: Vec<&'a str>,
}

/// Build the classifier input by walking the expected column list.
/// Unknown columns become 0; record features not listed are dropped.
pub fn align_features<'a>(record: &FeatureRecord, expected_columns: &'a [String]) -> AlignedRow<'a> {
    let mut values = Vec::with_capacity(expected_columns.len());
    let mut missing = Vec::new();

    for column in expected_columns {
        match record.get_by_name(column) {
            Some(value) => values.push(value as f64),
            None => {
                missing.push(column.as_str());
                values.push(0.0);
            }
        }
    }

    AlignedRow { values, missing }
}

// ============================================================================
// STATS
// ============================================================================

#[derive(Debug, Default)]
struct InferenceStats {
    inference_count: AtomicU64,
    phishing_count: AtomicU64,
    error_count: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl InferenceStats {
    fn record(&self, verdict: &Verdict, elapsed_us: u64) {
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        match verdict.prediction {
            Prediction::Phishing => {
                self.phishing_count.fetch_add(1, Ordering::Relaxed);
            }
            Prediction::Error => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
            }
            Prediction::Legitimate => {}
        }
    }
}

/// Engine status for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub status: String,
    pub model_loaded: bool,
    pub features_count: usize,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    pub inference_count: u64,
    pub phishing_count: u64,
    pub error_count: u64,
    pub avg_latency_ms: f64,
}

// ============================================================================
// PREDICTION SERVICE
// ============================================================================

#[derive(Debug)]
pub struct PredictionService {
    artifact: Option<Arc<ClassifierArtifact>>,
    load_error: Option<String>,
    threshold: ThresholdConfig,
    stats: InferenceStats,
}

impl PredictionService {
    pub fn new(artifact: ClassifierArtifact) -> Self {
        Self {
            artifact: Some(Arc::new(artifact)),
            load_error: None,
            threshold: ThresholdConfig::default(),
            stats: InferenceStats::default(),
        }
    }

    /// Degraded service: every prediction reports `ModelUnavailable`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            artifact: None,
            load_error: Some(reason.into()),
            threshold: ThresholdConfig::default(),
            stats: InferenceStats::default(),
        }
    }

    /// Load the artifact, falling back to degraded mode on failure
    pub fn load(config: &ArtifactConfig) -> Self {
        Self::from_load_result(ClassifierArtifact::load(config))
    }

    pub fn from_load_result(result: Result<ClassifierArtifact, ArtifactLoadError>) -> Self {
        match result {
            Ok(artifact) => Self::new(artifact),
            Err(e) => {
                log::warn!("Classifier unavailable, predictions will fail closed: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdConfig) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn is_model_loaded(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn threshold(&self) -> ThresholdConfig {
        self.threshold
    }

    /// Classify one URL. Always returns a well-formed verdict.
    pub fn predict(&self, url: &str) -> Verdict {
        let start_time = Instant::now();
        let verdict = self.predict_inner(url);
        let elapsed_us = start_time.elapsed().as_micros() as u64;

        self.stats.record(&verdict, elapsed_us);
        verdict
    }

    fn predict_inner(&self, url: &str) -> Verdict {
        let url = url.trim();
        if url.is_empty() {
            return Verdict::failed(PredictErrorKind::MissingInput, "No URL provided", None);
        }

        let Some(artifact) = self.artifact.as_deref() else {
            return Verdict::failed(PredictErrorKind::ModelUnavailable, "Model not loaded", None);
        };

        log::debug!("Predicting for URL: {}", url);
        let features = extract_url_features(url);

        match self.positive_probability(artifact, &features) {
            Ok(probability) => {
                let prediction = self.threshold.decide(probability);
                let score = risk_score(probability);
                log::debug!("Result: {:?} (score: {}, prob: {:.3})", prediction, score, probability);

                Verdict {
                    prediction,
                    risk_score: score,
                    confidence: round_confidence(probability),
                    features: Some(features),
                    error: None,
                    error_kind: None,
                }
            }
            Err(e) => {
                log::error!("Prediction error: {}", e);
                Verdict::failed(PredictErrorKind::PredictionFailure, e.to_string(), Some(features))
            }
        }
    }

    fn positive_probability(
        &self,
        artifact: &ClassifierArtifact,
        features: &FeatureRecord,
    ) -> Result<f64, ClassifierError> {
        let row = align_features(features, artifact.expected_columns());
        if !row.missing.is_empty() {
            log::debug!("Columns not produced by extractor, defaulted to 0: {:?}", row.missing);
        }

        let proba = artifact.classifier().predict_proba(&row.values)?;
        let probability = proba[POSITIVE_CLASS];

        if !proba.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)) {
            return Err(ClassifierError::InvalidOutput(proba));
        }

        Ok(probability)
    }

    /// Snapshot for the health endpoint
    pub fn status(&self) -> EngineStatus {
        let count = self.stats.inference_count.load(Ordering::Relaxed);
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let avg_latency_ms = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        let metadata = self.artifact.as_ref().map(|a| a.metadata());

        EngineStatus {
            status: (if self.is_model_loaded() { "running" } else { "no_model" }).to_string(),
            model_loaded: self.is_model_loaded(),
            features_count: self.artifact.as_ref().map_or(0, |a| a.expected_columns().len()),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            threshold: self.threshold.threshold,
            model_type: metadata.map(|m| m.model_type.clone()),
            loaded_at: metadata.map(|m| m.loaded_at),
            load_error: self.load_error.clone(),
            inference_count: count,
            phishing_count: self.stats.phishing_count.load(Ordering::Relaxed),
            error_count: self.stats.error_count.load(Ordering::Relaxed),
            avg_latency_ms,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
