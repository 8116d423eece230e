//! Artifact Loading
//!
//! Picks an adapter from the file extension: `.onnx` goes through tract,
//! `.json` is read as a [`Descriptor`].

use crate::descriptor::Descriptor;
use crate::model::{LabelDecoder, Predictor, Transformer};
use crate::onnx::OnnxModel;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Artifact paths for the battery health module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BhiPaths {
    /// Health index regressor (7 features)
    pub health: PathBuf,
    /// Abuse flag model (5 trailing features)
    pub abuse: PathBuf,
}

/// Artifact paths for the charging module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingPaths {
    /// Charging status classifier
    pub model: PathBuf,
    /// Scaler applied before the classifier
    pub scaler: PathBuf,
    /// Label encoder for the classifier's class codes
    pub labels: PathBuf,
    /// Ordered feature names (JSON array of strings)
    pub features: PathBuf,
}

/// Artifact paths for the driving module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingPaths {
    /// Stress score regressor
    pub stress_score: PathBuf,
    /// Stress class classifier
    pub stress_class: PathBuf,
    /// Label encoder for the stress class codes
    pub label_encoder: PathBuf,
    /// Optional scaler shared by both stress models, for exports that did
    /// not bake the scaling step into the graph
    #[serde(default)]
    pub scaler: Option<PathBuf>,
}

/// Every artifact path the engine loads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPaths {
    pub bhi: BhiPaths,
    pub charging: ChargingPaths,
    pub driving: DrivingPaths,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            bhi: BhiPaths {
                health: PathBuf::from("models/bhi/bhi_model.onnx"),
                abuse: PathBuf::from("models/bhi/abuse_model.onnx"),
            },
            charging: ChargingPaths {
                model: PathBuf::from("models/charging/charging_abuse_model.onnx"),
                scaler: PathBuf::from("models/charging/scaler.json"),
                labels: PathBuf::from("models/charging/labels.json"),
                features: PathBuf::from("models/charging/features.json"),
            },
            driving: DrivingPaths {
                stress_score: PathBuf::from("models/driving/stress_score_pipeline.onnx"),
                stress_class: PathBuf::from("models/driving/stress_classification_pipeline.onnx"),
                label_encoder: PathBuf::from("models/driving/label_encoder.json"),
                scaler: None,
            },
        }
    }
}

enum Format {
    Onnx,
    Json,
}

fn format_of(path: &Path) -> Result<Format, ModelError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("onnx") => Ok(Format::Onnx),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        _ => Err(ModelError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_to_string(path: &Path) -> Result<String, ModelError> {
    std::fs::read_to_string(path).map_err(|e| ModelError::ArtifactRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn read_descriptor(path: &Path) -> Result<Descriptor, ModelError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| ModelError::ModelLoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn unexpected(path: &Path, expected: &'static str, found: &Descriptor) -> ModelError {
    ModelError::UnexpectedArtifact {
        path: path.display().to_string(),
        expected,
        found: found.kind(),
    }
}

/// Load a regressor or classifier
pub fn load_predictor(path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
    debug!("Loading predictor from {}", path.display());
    let model: Box<dyn Predictor> = match format_of(path)? {
        Format::Onnx => Box::new(OnnxModel::load(path)?),
        Format::Json => match read_descriptor(path)? {
            Descriptor::LinearRegressor(m) => Box::new(m),
            Descriptor::LogisticClassifier(m) => Box::new(m),
            Descriptor::MulticlassClassifier(m) => Box::new(m),
            other => return Err(unexpected(path, "predictor", &other)),
        },
    };
    info!("Loaded {} predictor from {}", model.kind(), path.display());
    Ok(model)
}

/// Load a preprocessing transform
pub fn load_transformer(path: &Path) -> Result<Box<dyn Transformer>, ModelError> {
    debug!("Loading transformer from {}", path.display());
    let transformer: Box<dyn Transformer> = match format_of(path)? {
        Format::Onnx => Box::new(OnnxModel::load(path)?),
        Format::Json => match read_descriptor(path)? {
            Descriptor::StandardScaler(s) => Box::new(s),
            other => return Err(unexpected(path, "transformer", &other)),
        },
    };
    info!("Loaded {} transformer from {}", transformer.kind(), path.display());
    Ok(transformer)
}

/// Load a label encoder.
///
/// Accepts either a `label_encoder` descriptor or a bare JSON array of labels.
pub fn load_decoder(path: &Path) -> Result<Box<dyn LabelDecoder>, ModelError> {
    debug!("Loading label decoder from {}", path.display());
    match format_of(path)? {
        Format::Json => {}
        Format::Onnx => return Err(ModelError::UnsupportedFormat(path.display().to_string())),
    }

    let text = read_to_string(path)?;
    let load_err = |e: serde_json::Error| ModelError::ModelLoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    let value: serde_json::Value = serde_json::from_str(&text).map_err(load_err)?;

    let encoder = if value.is_array() {
        crate::descriptor::LabelEncoder::new(serde_json::from_value(value).map_err(load_err)?)
    } else {
        match serde_json::from_value(value).map_err(load_err)? {
            Descriptor::LabelEncoder(e) => e,
            other => return Err(unexpected(path, "label encoder", &other)),
        }
    };

    info!("Loaded label encoder with classes {:?}", encoder.classes);
    Ok(Box::new(encoder))
}

/// Load the ordered feature name list (JSON array of strings)
pub fn load_feature_names(path: &Path) -> Result<Vec<String>, ModelError> {
    let text = read_to_string(path)?;
    let names: Vec<String> = serde_json::from_str(&text).map_err(|e| ModelError::ModelLoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("Loaded {} feature names from {}", names.len(), path.display());
    Ok(names)
}
