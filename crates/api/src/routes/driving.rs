//! Driving & Electrical Stress Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use advisor::{is_known_driving_level, DrivingReport};
use feature_engine::{driving_input_specs, DrivingInputs, InputSpec};

use crate::error::ApiError;
use crate::observability::record_prediction;
use crate::AppState;

const MODULE: &str = "driving";

/// Form controls for the driving page
pub async fn get_inputs() -> Json<Vec<InputSpec>> {
    Json(driving_input_specs())
}

/// Score driving stress, decode the abuse level and advise
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<DrivingInputs>,
) -> Result<Json<DrivingReport>, ApiError> {
    let result = state.engine.predict_driving(&inputs);
    record_prediction(MODULE, result.is_ok());
    let prediction = result?;

    if !is_known_driving_level(&prediction.label) {
        warn!("Unrecognised driving label {:?} treated as aggressive", prediction.label);
    }
    Ok(Json(DrivingReport::evaluate(
        prediction.stress_score,
        &prediction.label,
    )))
}
