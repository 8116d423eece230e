//! Battery Health Index Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use advisor::BhiReport;
use feature_engine::{bhi_input_specs, BhiInputs, InputSpec};

use crate::error::ApiError;
use crate::observability::record_prediction;
use crate::AppState;

const MODULE: &str = "bhi";

/// Form controls for the battery health page
pub async fn get_inputs() -> Json<Vec<InputSpec>> {
    Json(bhi_input_specs())
}

/// Predict the health index, apply the abuse penalty and advise
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<BhiInputs>,
) -> Result<Json<BhiReport>, ApiError> {
    let result = state.engine.predict_bhi(&inputs);
    record_prediction(MODULE, result.is_ok());
    let prediction = result?;

    let report = BhiReport::evaluate(prediction.raw_index, prediction.abuse_flag);
    debug!(
        "BHI {:.2} -> {:.2} ({:?})",
        report.raw_index, report.adjusted_index, report.tier
    );
    Ok(Json(report))
}
