//! Model Capabilities
//!
//! The inference path only needs three things from an artifact: a scalar
//! prediction, a vector transform, or a class-code decode.

use crate::ModelError;
use tracing::debug;

/// Anything that maps a feature vector to a single value.
///
/// Classifiers return their class code as a float.
pub trait Predictor: Send + Sync {
    /// Predict a single value for one sample
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Short name of the backing format, for logs and health output
    fn kind(&self) -> &'static str;
}

/// Preprocessing step applied before a predictor (e.g. a fitted scaler)
pub trait Transformer: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;

    fn kind(&self) -> &'static str;
}

/// Maps integer class codes back to their labels
pub trait LabelDecoder: Send + Sync {
    fn inverse_transform(&self, code: i64) -> Result<String, ModelError>;

    /// Labels in code order
    fn classes(&self) -> &[String];
}

/// Anything that maps a feature vector straight to a label
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &[f64]) -> Result<String, ModelError>;

    fn kind(&self) -> &'static str;
}

/// Convert a predicted class value into an integer code
pub(crate) fn class_code(value: f64) -> Result<i64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::InferenceFailed(format!(
            "classifier produced non-finite class value {}",
            value
        )));
    }
    Ok(value.round() as i64)
}

/// Classifier built from a code-producing predictor and a decoder
pub struct DecodedClassifier {
    predictor: Box<dyn Predictor>,
    decoder: Box<dyn LabelDecoder>,
}

impl DecodedClassifier {
    pub fn new(predictor: Box<dyn Predictor>, decoder: Box<dyn LabelDecoder>) -> Self {
        Self { predictor, decoder }
    }
}

impl Classifier for DecodedClassifier {
    fn classify(&self, features: &[f64]) -> Result<String, ModelError> {
        let code = class_code(self.predictor.predict(features)?)?;
        self.decoder.inverse_transform(code)
    }

    fn kind(&self) -> &'static str {
        self.predictor.kind()
    }
}

/// Predictor preceded by an optional transform, mirroring a fitted pipeline
pub struct ScaledPredictor {
    scaler: Option<Box<dyn Transformer>>,
    model: Box<dyn Predictor>,
}

impl ScaledPredictor {
    pub fn new(scaler: Option<Box<dyn Transformer>>, model: Box<dyn Predictor>) -> Self {
        Self { scaler, model }
    }
}

impl Predictor for ScaledPredictor {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        match &self.scaler {
            Some(scaler) => {
                let scaled = scaler.transform(features)?;
                debug!("Scaled {} features with {}", scaled.len(), scaler.kind());
                self.model.predict(&scaled)
            }
            None => self.model.predict(features),
        }
    }

    fn kind(&self) -> &'static str {
        self.model.kind()
    }
}

/// Predictor that always returns the same value, regardless of input
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }

    fn kind(&self) -> &'static str {
        "constant"
    }
}
