//! Decision Threshold
//!
//! Turns the classifier's phishing probability into a verdict, a 0-100
//! risk score and a rounded confidence.

use serde::{Deserialize, Serialize};

use super::verdict::Prediction;

/// Default cutoff. Below the 0.5 midpoint on purpose: a missed phishing
/// page costs more than a false warning.
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Probability at or above which a URL is labeled phishing
    pub threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// Accepts thresholds in (0, 1]; anything else yields `None`
    pub fn new(threshold: f64) -> Option<Self> {
        (threshold > 0.0 && threshold <= 1.0).then_some(Self { threshold })
    }

    /// `Phishing` iff `probability >= threshold`
    pub fn decide(&self, probability: f64) -> Prediction {
        if probability >= self.threshold {
            Prediction::Phishing
        } else {
            Prediction::Legitimate
        }
    }
}

/// `floor(probability * 100)`, clamped to 0-100
pub fn risk_score(probability: f64) -> u8 {
    (probability * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// Probability rounded to three decimals
pub fn round_confidence(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}
