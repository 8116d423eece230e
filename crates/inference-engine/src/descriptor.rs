//! JSON Model Descriptors
//!
//! Plain-JSON exports of fitted linear models, scalers and label encoders.
//! The `kind` field selects the variant:
//!
//! ```json
//! { "kind": "linear_regressor", "intercept": 92.0, "coefficients": [-0.1, -0.01] }
//! ```

use crate::model::{LabelDecoder, Predictor, Transformer};
use crate::ModelError;
use serde::{Deserialize, Serialize};

fn check_shape(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::InvalidInputShape {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

fn dot(weights: &[f64], features: &[f64]) -> f64 {
    weights.iter().zip(features).map(|(w, x)| w * x).sum()
}

/// Any artifact that can be stored as a JSON descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Descriptor {
    LinearRegressor(LinearRegressor),
    LogisticClassifier(LogisticClassifier),
    MulticlassClassifier(MulticlassClassifier),
    StandardScaler(StandardScaler),
    LabelEncoder(LabelEncoder),
}

impl Descriptor {
    /// Descriptor kind, as written in the `kind` field
    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::LinearRegressor(_) => "linear_regressor",
            Descriptor::LogisticClassifier(_) => "logistic_classifier",
            Descriptor::MulticlassClassifier(_) => "multiclass_classifier",
            Descriptor::StandardScaler(_) => "standard_scaler",
            Descriptor::LabelEncoder(_) => "label_encoder",
        }
    }
}

/// Ordinary linear regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Predictor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_shape(self.coefficients.len(), features)?;
        Ok(self.intercept + dot(&self.coefficients, features))
    }

    fn kind(&self) -> &'static str {
        "linear_regressor"
    }
}

/// What a binary logistic classifier returns from `predict`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogisticOutput {
    /// Class code 0 or 1
    #[default]
    Label,
    /// Probability of class 1
    Probability,
}

fn default_threshold() -> f64 {
    0.5
}

/// Binary logistic regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub output: LogisticOutput,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticClassifier {
    /// Probability of the positive class
    pub fn probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_shape(self.coefficients.len(), features)?;
        let z = self.intercept + dot(&self.coefficients, features);
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Predictor for LogisticClassifier {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let p = self.probability(features)?;
        Ok(match self.output {
            LogisticOutput::Probability => p,
            LogisticOutput::Label if p >= self.threshold => 1.0,
            LogisticOutput::Label => 0.0,
        })
    }

    fn kind(&self) -> &'static str {
        "logistic_classifier"
    }
}

/// One-vs-rest linear classifier; predicts the code of the highest score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticlassClassifier {
    pub intercepts: Vec<f64>,
    /// One weight row per class
    pub coefficients: Vec<Vec<f64>>,
}

impl Predictor for MulticlassClassifier {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if self.coefficients.is_empty() || self.coefficients.len() != self.intercepts.len() {
            return Err(ModelError::InferenceFailed(format!(
                "classifier has {} weight rows and {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }

        let mut best = (0usize, f64::NEG_INFINITY);
        for (code, (row, intercept)) in self.coefficients.iter().zip(&self.intercepts).enumerate() {
            check_shape(row.len(), features)?;
            let score = intercept + dot(row, features);
            // ties keep the lower code
            if score > best.1 {
                best = (code, score);
            }
        }
        Ok(best.0 as f64)
    }

    fn kind(&self) -> &'static str {
        "multiclass_classifier"
    }
}

/// Per-feature standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }
}

impl Transformer for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_shape(self.mean.len(), features)?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // zero-variance columns are only centered
                if *scale == 0.0 {
                    x - mean
                } else {
                    (x - mean) / scale
                }
            })
            .collect())
    }

    fn kind(&self) -> &'static str {
        "standard_scaler"
    }
}

/// Ordered class labels; code `i` decodes to `classes[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }
}

impl LabelDecoder for LabelEncoder {
    fn inverse_transform(&self, code: i64) -> Result<String, ModelError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .cloned()
            .ok_or(ModelError::UnknownClass {
                code,
                classes: self.classes.len(),
            })
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}
