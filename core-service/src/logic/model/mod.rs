//! Model Module - Classifier Inference
//!
//! Inference is kept apart from feature extraction: the artifact loader, the
//! classifier families, the decision threshold and the prediction service.

pub mod artifact;
pub mod classifier;
pub mod inference;
pub mod threshold;
pub mod verdict;

// Re-export common types
pub use artifact::{ArtifactConfig, ArtifactLoadError, ClassifierArtifact, ModelMetadata};
pub use classifier::{Classifier, ClassifierError, ModelSpec};
pub use inference::{align_features, EngineStatus, PredictionService};
pub use threshold::{ThresholdConfig, DEFAULT_THRESHOLD};
pub use verdict::{PredictErrorKind, Prediction, Verdict};
