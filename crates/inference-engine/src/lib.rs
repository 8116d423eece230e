//! Model Inference Engine
//!
//! Loads the pre-trained battery health, charging and driving artifacts and
//! runs them against assembled feature vectors. Each artifact format gets one
//! adapter behind the [`Predictor`], [`Transformer`] and [`LabelDecoder`]
//! capabilities.

mod descriptor;
mod engine;
mod model;
mod onnx;
mod store;

pub use descriptor::{
    Descriptor, LabelEncoder, LinearRegressor, LogisticClassifier, LogisticOutput,
    MulticlassClassifier, StandardScaler,
};
pub use engine::{
    BhiModels, BhiPrediction, ChargingModels, DrivingModels, DrivingPrediction, InferenceEngine,
};
pub use model::{
    Classifier, ConstantPredictor, DecodedClassifier, LabelDecoder, Predictor, ScaledPredictor,
    Transformer,
};
pub use onnx::OnnxModel;
pub use store::{
    load_decoder, load_feature_names, load_predictor, load_transformer, BhiPaths, ChargingPaths,
    DrivingPaths, ModelPaths,
};

use thiserror::Error;

/// Errors while loading or running a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read artifact {path}: {reason}")]
    ArtifactRead { path: String, reason: String },
    #[error("Model load failed for {path}: {reason}")]
    ModelLoadError { path: String, reason: String },
    #[error("Unsupported artifact format: {0}")]
    UnsupportedFormat(String),
    #[error("Artifact {path} is a {found}, expected a {expected}")]
    UnexpectedArtifact {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Unknown class code {code} (encoder knows {classes} classes)")]
    UnknownClass { code: i64, classes: usize },
}

impl ModelError {
    /// Whether the error was caused by the request's feature vector rather
    /// than the loaded artifacts
    pub fn is_input_error(&self) -> bool {
        matches!(self, ModelError::InvalidInputShape { .. })
    }
}
