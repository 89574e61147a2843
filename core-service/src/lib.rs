//! Phish Guard Core
//!
//! Classifies URLs as phishing or legitimate. A deterministic extractor
//! turns the raw URL into 18 numeric features; a pre-trained classifier
//! scores them and a fixed threshold turns the score into a verdict.
//!
//! ```text
//!   url ──► extract_url_features ──► FeatureRecord
//!                                        │ align to expected columns
//!                                        ▼
//!                              Classifier::predict_proba
//!                                        │ threshold (0.25)
//!                                        ▼
//!                                     Verdict
//! ```

pub mod constants;
pub mod logic;

pub use logic::features::{extract_url_features, FeatureRecord, ParsedUrl, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::model::{
    ArtifactConfig, ArtifactLoadError, Classifier, ClassifierArtifact, ClassifierError,
    EngineStatus, PredictErrorKind, Prediction, PredictionService, ThresholdConfig, Verdict,
};
