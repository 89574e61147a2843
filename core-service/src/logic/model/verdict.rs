//! Verdict types returned by the prediction service

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureRecord;

/// Risk score reported when no real prediction could be made
pub const NEUTRAL_RISK_SCORE: u8 = 50;

/// Confidence reported when no real prediction could be made
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Phishing,
    Legitimate,
    Error,
}

/// Why a verdict could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictErrorKind {
    /// No URL, or only whitespace
    MissingInput,
    /// The classifier artifact failed to load at startup
    ModelUnavailable,
    /// Reconciliation or classifier invocation failed
    PredictionFailure,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub prediction: Prediction,
    pub risk_score: u8,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<PredictErrorKind>,
}

impl Verdict {
    /// Neutral verdict for a request that could not be scored
    pub fn failed(kind: PredictErrorKind, message: impl Into<String>, features: Option<FeatureRecord>) -> Self {
        Self {
            prediction: Prediction::Error,
            risk_score: NEUTRAL_RISK_SCORE,
            confidence: NEUTRAL_CONFIDENCE,
            features,
            error: Some(message.into()),
            error_kind: Some(kind),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_verdict_is_neutral() {
        let verdict = Verdict::failed(PredictErrorKind::ModelUnavailable, "Model not loaded", None);
        assert_eq!(verdict.prediction, Prediction::Error);
        assert_eq!(verdict.risk_score, 50);
        assert_eq!(verdict.confidence, 0.5);
        assert!(verdict.is_error());
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = Verdict::failed(PredictErrorKind::MissingInput, "No URL provided", None);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["prediction"], "Error");
        assert_eq!(json["error_kind"], "missing_input");
        assert_eq!(json["error"], "No URL provided");
        assert!(json.get("features").is_none());
    }
}
