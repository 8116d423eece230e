//! Charging Abuse Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use advisor::{is_known_charging_status, ChargingReport};
use feature_engine::{charging_input_specs, ChargingInputs, InputSpec};

use crate::error::ApiError;
use crate::observability::record_prediction;
use crate::AppState;

const MODULE: &str = "charging";

/// One number entry per charging feature name
pub async fn get_inputs(State(state): State<Arc<AppState>>) -> Json<Vec<InputSpec>> {
    Json(charging_input_specs(state.engine.charging_schema().names()))
}

/// Classify the charging behaviour and advise
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<ChargingInputs>,
) -> Result<Json<ChargingReport>, ApiError> {
    let features = state.engine.charging_schema().assemble(&inputs);
    let result = state.engine.predict_charging(&features);
    record_prediction(MODULE, result.is_ok());
    let status = result?;

    if !is_known_charging_status(&status) {
        warn!("Unrecognised charging status {:?} gets the abuse advice", status);
    }
    Ok(Json(ChargingReport::evaluate(&status)))
}
