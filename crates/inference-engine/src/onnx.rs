//! ONNX model adapter using tract

use crate::model::{Predictor, Transformer};
use crate::ModelError;
use std::path::Path;
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// An optimized ONNX graph, run one sample at a time.
///
/// As a [`Predictor`] it yields the first element of the first output, which
/// for converted classifiers is the predicted class code. As a
/// [`Transformer`] it yields the whole first output.
pub struct OnnxModel {
    plan: TractModel,
    path: String,
    /// Feature count, when the graph declares a concrete input width
    n_features: Option<usize>,
}

impl OnnxModel {
    /// Load and optimize an ONNX graph from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let path_str = path.display().to_string();
        let load_err = |reason: String| ModelError::ModelLoadError {
            path: path_str.clone(),
            reason,
        };

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| load_err(e.to_string()))?
            .into_optimized()
            .map_err(|e| load_err(e.to_string()))?;

        let n_features = model
            .input_fact(0)
            .ok()
            .and_then(|fact| fact.shape.iter().last())
            .and_then(|dim| dim.as_i64())
            .and_then(|width| usize::try_from(width).ok());

        let plan = model.into_runnable().map_err(|e| load_err(e.to_string()))?;

        info!("Loaded ONNX model {} (inputs: {:?})", path_str, n_features);
        Ok(Self {
            plan,
            path: path_str,
            n_features,
        })
    }

    /// Run the graph on one sample and return its first output as f32s
    fn run(&self, features: &[f64]) -> Result<Vec<f32>, ModelError> {
        if let Some(expected) = self.n_features {
            if features.len() != expected {
                return Err(ModelError::InvalidInputShape {
                    expected,
                    actual: features.len(),
                });
            }
        }

        let start = Instant::now();
        let data: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, data.len()), data)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;
        let first = outputs
            .first()
            .ok_or_else(|| ModelError::InferenceFailed(format!("{} produced no output", self.path)))?;
        let values = first
            .cast_to::<f32>()
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?
            .as_slice::<f32>()
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?
            .to_vec();

        debug!("ONNX inference on {} took {}us", self.path, start.elapsed().as_micros());
        Ok(values)
    }
}

impl Predictor for OnnxModel {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let values = self.run(features)?;
        values
            .first()
            .map(|&v| v as f64)
            .ok_or_else(|| ModelError::InferenceFailed(format!("{} produced an empty output", self.path)))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

impl Transformer for OnnxModel {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(self.run(features)?.into_iter().map(f64::from).collect())
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
