//! Classifier - probability models exported by the training pipeline
//!
//! Two model families are supported, both serialized as JSON and tagged by
//! `model_type`:
//! - `logistic`: `p = sigmoid(w · x + b)`
//! - `random_forest`: averaged leaf class distributions over a tree ensemble

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of the positive ("phishing") class in a two-class output
pub const POSITIVE_CLASS: usize = 1;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("classifier produced invalid probabilities {0:?}")]
    InvalidOutput([f64; 2]),

    #[error("classifier failed: {0}")]
    Failed(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A pre-trained two-class probabilistic classifier.
///
/// Implementations must be safe to call from many request handlers at
/// once; they are never mutated after loading.
pub trait Classifier: Send + Sync {
    /// Class probabilities `[legitimate, phishing]` for one aligned row
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ClassifierError>;

    /// Short model family name for status reporting
    fn model_type(&self) -> &str;
}

// ============================================================================
// MODEL SPECS
// ============================================================================

/// Any model the artifact loader understands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
    RandomForest(ForestModel),
}

impl ModelSpec {
    /// Structural checks against the number of expected columns.
    /// A model that passes cannot index out of bounds at predict time.
    pub fn validate(&self, n_columns: usize) -> Result<(), String> {
        match self {
            ModelSpec::Logistic(model) => model.validate(n_columns),
            ModelSpec::RandomForest(model) => model.validate(n_columns),
        }
    }
}

impl Classifier for ModelSpec {
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ClassifierError> {
        match self {
            ModelSpec::Logistic(model) => model.predict_proba(row),
            ModelSpec::RandomForest(model) => model.predict_proba(row),
        }
    }

    fn model_type(&self) -> &str {
        match self {
            ModelSpec::Logistic(_) => "logistic",
            ModelSpec::RandomForest(_) => "random_forest",
        }
    }
}

// ============================================================================
// LOGISTIC REGRESSION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    fn validate(&self, n_columns: usize) -> Result<(), String> {
        if self.weights.len() != n_columns {
            return Err(format!(
                "logistic model has {} weights for {} columns",
                self.weights.len(),
                n_columns
            ));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err("logistic model has non-finite coefficients".to_string());
        }
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ClassifierError> {
        if row.len() != self.weights.len() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.weights.len(),
                actual: row.len(),
            });
        }

        let z: f64 = self.intercept
            + self.weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());

        Ok([1.0 - p, p])
    }
}

// ============================================================================
// RANDOM FOREST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Node 0 is the root
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go left iff `row[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class counts or probabilities `[legitimate, phishing]`
    Leaf { value: [f64; 2] },
}

impl DecisionTree {
    fn validate(&self, n_columns: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if feature >= n_columns {
                        return Err(format!("node {} splits on column {} of {}", i, feature, n_columns));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {} has a NaN threshold", i));
                    }
                    // Children always come after their parent, so walks terminate
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let valid = value.iter().all(|v| v.is_finite() && *v >= 0.0);
                    if !valid || value[0] + value[1] <= 0.0 {
                        return Err(format!("node {} has invalid leaf {:?}", i, value));
                    }
                }
            }
        }

        Ok(())
    }

    /// Normalized class distribution of the leaf `row` lands in
    fn leaf_distribution(&self, row: &[f64]) -> Result<[f64; 2], ClassifierError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let x = row.get(*feature).copied().ok_or(ClassifierError::DimensionMismatch {
                        expected: feature + 1,
                        actual: row.len(),
                    })?;
                    index = if x <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => {
                    let total = value[0] + value[1];
                    return Ok([value[0] / total, value[1] / total]);
                }
                None => {
                    return Err(ClassifierError::Failed(format!("tree walked to missing node {}", index)));
                }
            }
        }
    }
}

impl ForestModel {
    fn validate(&self, n_columns: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_columns).map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ClassifierError> {
        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(row)?;
            sum[0] += dist[0];
            sum[1] += dist[1];
        }

        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split { feature, threshold, left: 1, right: 2 },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    #[test]
    fn test_logistic_predict() {
        let model = LogisticModel { weights: vec![0.0, 0.0], intercept: 0.0 };
        assert_eq!(model.predict_proba(&[5.0, 7.0]).unwrap(), [0.5, 0.5]);

        let model = LogisticModel { weights: vec![2.0, -1.0], intercept: -1.0 };
        let p = model.predict_proba(&[1.0, 0.0]).unwrap()[POSITIVE_CLASS];
        assert!((p - 0.731_058_578_6).abs() < 1e-9);
    }

    #[test]
    fn test_logistic_dimension_mismatch() {
        let model = LogisticModel { weights: vec![1.0; 3], intercept: 0.0 };
        assert_eq!(
            model.predict_proba(&[1.0]),
            Err(ClassifierError::DimensionMismatch { expected: 3, actual: 1 })
        );
        assert!(model.validate(2).is_err());
        assert!(model.validate(3).is_ok());
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = ForestModel {
            trees: vec![
                stump(0, 0.5, [9.0, 1.0], [1.0, 3.0]),
                stump(1, 10.0, [1.0, 0.0], [0.0, 1.0]),
            ],
        };
        assert!(forest.validate(2).is_ok());

        let p = forest.predict_proba(&[0.0, 0.0]).unwrap();
        assert!((p[POSITIVE_CLASS] - 0.05).abs() < 1e-12);

        let p = forest.predict_proba(&[1.0, 20.0]).unwrap();
        assert!((p[POSITIVE_CLASS] - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_forest_validation() {
        let bad_feature = ForestModel { trees: vec![stump(5, 0.5, [1.0, 0.0], [0.0, 1.0])] };
        assert!(bad_feature.validate(2).is_err());

        let empty_leaf = ForestModel { trees: vec![stump(0, 0.5, [0.0, 0.0], [0.0, 1.0])] };
        assert!(empty_leaf.validate(2).is_err());

        let cycle = ForestModel {
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 0 }],
            }],
        };
        assert!(cycle.validate(1).is_err());

        assert!(ForestModel { trees: vec![] }.validate(1).is_err());
    }

    #[test]
    fn test_model_spec_from_json() {
        let json = r#"{
            "model_type": "random_forest",
            "trees": [{ "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [3.0, 1.0] },
                { "value": [0.0, 2.0] }
            ]}]
        }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.model_type(), "random_forest");
        assert!(spec.validate(1).is_ok());
        assert_eq!(spec.predict_proba(&[1.0]).unwrap(), [0.0, 1.0]);

        let json = r#"{ "model_type": "logistic", "weights": [1.0], "intercept": 0.0 }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.model_type(), "logistic");
    }
}
