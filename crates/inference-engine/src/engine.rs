//! Inference Engine Implementation

use crate::model::{
    class_code, Classifier, DecodedClassifier, LabelDecoder, Predictor, ScaledPredictor, Transformer,
};
use crate::store::{
    load_decoder, load_feature_names, load_predictor, load_transformer, ModelPaths,
};
use crate::ModelError;
use feature_engine::{BhiInputs, ChargingSchema, DrivingInputs, FeatureVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Battery health models
pub struct BhiModels {
    pub health: Box<dyn Predictor>,
    pub abuse: Box<dyn Predictor>,
}

/// Charging status models
pub struct ChargingModels {
    pub scaler: Box<dyn Transformer>,
    pub classifier: Box<dyn Classifier>,
    pub schema: ChargingSchema,
}

/// Driving stress models
pub struct DrivingModels {
    pub stress_score: Box<dyn Predictor>,
    pub stress_class: Box<dyn Predictor>,
    pub encoder: Box<dyn LabelDecoder>,
}

/// Raw outputs of the battery health models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BhiPrediction {
    /// Health index before the abuse penalty
    pub raw_index: f64,
    /// Abuse flag (0, 1, or a probability)
    pub abuse_flag: f64,
}

/// Raw outputs of the driving models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingPrediction {
    pub stress_score: f64,
    /// Decoded stress class
    pub label: String,
}

/// Holds every loaded model. Built once at startup and only read afterwards.
pub struct InferenceEngine {
    bhi: BhiModels,
    charging: ChargingModels,
    driving: DrivingModels,
}

impl InferenceEngine {
    /// Assemble an engine from already-constructed models
    pub fn new(bhi: BhiModels, charging: ChargingModels, driving: DrivingModels) -> Self {
        Self {
            bhi,
            charging,
            driving,
        }
    }

    /// Load every artifact. Any failure is fatal to startup.
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelError> {
        info!("Loading battery health models");
        let bhi = BhiModels {
            health: load_predictor(&paths.bhi.health)?,
            abuse: load_predictor(&paths.bhi.abuse)?,
        };

        info!("Loading charging models");
        let charging = ChargingModels {
            scaler: load_transformer(&paths.charging.scaler)?,
            classifier: Box::new(DecodedClassifier::new(
                load_predictor(&paths.charging.model)?,
                load_decoder(&paths.charging.labels)?,
            )),
            schema: ChargingSchema::new(load_feature_names(&paths.charging.features)?),
        };

        info!("Loading driving models");
        let load_driving = |path: &std::path::Path| -> Result<Box<dyn Predictor>, ModelError> {
            let model = load_predictor(path)?;
            let model: Box<dyn Predictor> = match &paths.driving.scaler {
                Some(scaler) => Box::new(ScaledPredictor::new(Some(load_transformer(scaler)?), model)),
                None => model,
            };
            Ok(model)
        };
        let driving = DrivingModels {
            stress_score: load_driving(&paths.driving.stress_score)?,
            stress_class: load_driving(&paths.driving.stress_class)?,
            encoder: load_decoder(&paths.driving.label_encoder)?,
        };

        info!(
            "All models loaded ({} charging features)",
            charging.schema.len()
        );
        Ok(Self::new(bhi, charging, driving))
    }

    /// Run the health and abuse models on the battery form
    pub fn predict_bhi(&self, inputs: &BhiInputs) -> Result<BhiPrediction, ModelError> {
        let features = inputs.to_vector();
        let raw_index = self.bhi.health.predict(features.as_slice())?;
        let abuse_flag = self.bhi.abuse.predict(inputs.to_abuse_vector().as_slice())?;

        debug!("BHI prediction: raw={:.3}, abuse={:.3}", raw_index, abuse_flag);
        Ok(BhiPrediction {
            raw_index,
            abuse_flag,
        })
    }

    /// Scale and classify a charging vector
    pub fn predict_charging(&self, features: &FeatureVector) -> Result<String, ModelError> {
        let scaled = self.charging.scaler.transform(features.as_slice())?;
        let status = self.charging.classifier.classify(&scaled)?;

        debug!("Charging prediction: {}", status);
        Ok(status)
    }

    /// Run both driving models and decode the stress class
    pub fn predict_driving(&self, inputs: &DrivingInputs) -> Result<DrivingPrediction, ModelError> {
        let features = inputs.to_vector();
        let stress_score = self.driving.stress_score.predict(features.as_slice())?;
        let code = class_code(self.driving.stress_class.predict(features.as_slice())?)?;
        let label = self.driving.encoder.inverse_transform(code)?;

        debug!("Driving prediction: stress={:.3}, class={} ({})", stress_score, code, label);
        Ok(DrivingPrediction {
            stress_score,
            label,
        })
    }

    /// Ordered charging feature names
    pub fn charging_schema(&self) -> &ChargingSchema {
        &self.charging.schema
    }

    /// Labels the driving encoder can produce
    pub fn driving_classes(&self) -> &[String] {
        self.driving.encoder.classes()
    }

    /// Backing formats of the loaded predictors, keyed by role
    pub fn model_kinds(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("bhi_health", self.bhi.health.kind()),
            ("bhi_abuse", self.bhi.abuse.kind()),
            ("charging_scaler", self.charging.scaler.kind()),
            ("charging_classifier", self.charging.classifier.kind()),
            ("driving_stress_score", self.driving.stress_score.kind()),
            ("driving_stress_class", self.driving.stress_class.kind()),
        ]
    }
}
