//! Integration tests for the dashboard API endpoints

use api::{create_router, AppState, Settings};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use feature_engine::ChargingSchema;
use inference_engine::{
    BhiModels, ChargingModels, ConstantPredictor, DecodedClassifier, DrivingModels,
    InferenceEngine, LabelEncoder, Predictor, StandardScaler,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn mock_engine(raw: f64, abuse: f64, charging_code: f64, driving_code: f64) -> InferenceEngine {
    InferenceEngine::new(
        BhiModels {
            health: Box::new(ConstantPredictor(raw)),
            abuse: Box::new(ConstantPredictor(abuse)),
        },
        ChargingModels {
            scaler: Box::new(StandardScaler::new(vec![0.0; 3], vec![1.0; 3])),
            classifier: Box::new(DecodedClassifier::new(
                Box::new(ConstantPredictor(charging_code)),
                Box::new(LabelEncoder::new(vec![
                    "Abusive".to_string(),
                    "Normal".to_string(),
                    "Overheated".to_string(),
                ])),
            )),
            schema: ChargingSchema::new(vec![
                "charge_rate".to_string(),
                "end_soc".to_string(),
                "temperature".to_string(),
            ]),
        },
        DrivingModels {
            stress_score: Box::new(ConstantPredictor(63.456)),
            stress_class: Box::new(ConstantPredictor(driving_code)),
            encoder: Box::new(LabelEncoder::new(vec![
                "High".to_string(),
                "Low".to_string(),
                "Moderate".to_string(),
                "Extreme".to_string(),
            ])),
        },
    )
}

fn app(engine: InferenceEngine) -> Router {
    create_router(Arc::new(AppState::new(engine, None)))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_bhi_end_to_end_with_abuse() {
    let body = json!({
        "temperature_c": 30,
        "charging_cycles": 500,
        "fast_charge_ratio": 0.3,
        "discharge_rate_c": 1.2,
        "vehicle_age_months": 24,
        "internal_resistance_ohm": 0.03,
        "driving_style": "Moderate"
    });

    let (status, report) = send(app(mock_engine(100.0, 1.0, 1.0, 1.0)), "POST", "/api/v1/bhi", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["raw_index"], 100.0);
    assert_eq!(report["adjusted_index"], 75.0);
    assert_eq!(report["metric"], "75.00");
    assert_eq!(report["progress"], 75);
    assert_eq!(report["tier"], "moderate");
    assert_eq!(report["banner"]["level"], "warning");
    assert_eq!(report["banner"]["color"], "yellow");
    assert_eq!(report["banner"]["message"], "Moderate Battery");
    assert_eq!(
        report["recommendation"],
        "Reduce fast charging and avoid overheating."
    );
}

#[tokio::test]
async fn test_bhi_without_abuse_keeps_raw_index() {
    let (status, report) =
        send(app(mock_engine(91.5, 0.0, 1.0, 1.0)), "POST", "/api/v1/bhi", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["adjusted_index"], 91.5);
    assert_eq!(report["tier"], "healthy");
    assert_eq!(report["banner"]["level"], "success");
}

#[tokio::test]
async fn test_bhi_critical_score() {
    let (_, report) =
        send(app(mock_engine(60.0, 1.0, 1.0, 1.0)), "POST", "/api/v1/bhi", Some(json!({}))).await;

    assert_eq!(report["adjusted_index"], 45.0);
    assert_eq!(report["tier"], "degrading");
    assert_eq!(
        report["recommendation"],
        "Battery is critical. Use AC charging only and visit service center."
    );
}

#[tokio::test]
async fn test_charging_normal_and_abusive() {
    let (status, normal) = send(
        app(mock_engine(90.0, 0.0, 1.0, 1.0)),
        "POST",
        "/api/v1/charging",
        Some(json!({"values": {"end_soc": 0.8}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(normal["status"], "Normal");
    assert_eq!(normal["banner"]["message"], "Charging is Safe");

    let (_, abusive) = send(
        app(mock_engine(90.0, 0.0, 0.0, 1.0)),
        "POST",
        "/api/v1/charging",
        Some(json!({"vector": [1.0, 0.95, 45.0]})),
    )
    .await;
    assert_eq!(abusive["status"], "Abusive");
    assert_eq!(abusive["banner"]["level"], "error");
    assert_eq!(
        abusive["recommendation"],
        "Avoid fast charging above 80%, and do not charge at high temperature."
    );
}

#[tokio::test]
async fn test_charging_unlisted_label_gets_abuse_advice() {
    let (_, report) = send(
        app(mock_engine(90.0, 0.0, 2.0, 1.0)),
        "POST",
        "/api/v1/charging",
        Some(json!({})),
    )
    .await;

    assert_eq!(report["status"], "Overheated");
    assert_eq!(report["banner"]["level"], "success");
    assert_eq!(
        report["recommendation"],
        "Avoid fast charging above 80%, and do not charge at high temperature."
    );
}

#[tokio::test]
async fn test_charging_shape_mismatch_is_unprocessable() {
    let (status, body) = send(
        app(mock_engine(90.0, 0.0, 1.0, 1.0)),
        "POST",
        "/api/v1/charging",
        Some(json!({"vector": [1.0, 2.0]})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid input shape: expected 3 features, got 2");
}

#[tokio::test]
async fn test_driving_labels() {
    let (_, moderate) =
        send(app(mock_engine(90.0, 0.0, 1.0, 2.0)), "POST", "/api/v1/driving", Some(json!({}))).await;
    assert_eq!(moderate["abuse_level"], "Moderate");
    assert_eq!(moderate["metric"], "63.46");
    assert_eq!(moderate["recommendation"], "Avoid harsh acceleration and braking.");

    let (_, high) =
        send(app(mock_engine(90.0, 0.0, 1.0, 0.0)), "POST", "/api/v1/driving", Some(json!({}))).await;
    let (_, extreme) =
        send(app(mock_engine(90.0, 0.0, 1.0, 3.0)), "POST", "/api/v1/driving", Some(json!({}))).await;
    assert_eq!(extreme["abuse_level"], "Extreme");
    assert_eq!(extreme["recommendation"], high["recommendation"]);
}

#[tokio::test]
async fn test_input_specs() {
    let (status, bhi) = send(app(mock_engine(90.0, 0.0, 1.0, 1.0)), "GET", "/api/v1/bhi/inputs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bhi[0]["key"], "temperature_c");
    assert_eq!(bhi[0]["min"], 10.0);
    assert_eq!(bhi[0]["max"], 50.0);
    assert_eq!(bhi[0]["default"], 30.0);

    let (_, charging) =
        send(app(mock_engine(90.0, 0.0, 1.0, 1.0)), "GET", "/api/v1/charging/inputs", None).await;
    assert_eq!(charging.as_array().unwrap().len(), 3);
    assert_eq!(charging[2]["key"], "temperature");
    assert_eq!(charging[2]["default"], 0.5);
}

#[tokio::test]
async fn test_health_and_about() {
    let (status, health) = send(app(mock_engine(90.0, 0.0, 1.0, 1.0)), "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["charging_features"], 3);
    assert_eq!(health["models"]["bhi_health"], "constant");
    assert_eq!(health["models"]["charging_classifier"], "constant");

    let (status, about) = send(app(mock_engine(90.0, 0.0, 1.0, 1.0)), "GET", "/api/v1/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(about["modules"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (status, _) = send(app(mock_engine(90.0, 0.0, 1.0, 1.0)), "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn write(dir: &Path, rel: &str, value: Value) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, value.to_string()).unwrap();
}

/// Lay out a full set of JSON artifacts and point the settings at them
fn artifact_settings(dir: &Path) -> Settings {
    write(dir, "bhi/bhi_model.json", json!({
        "kind": "linear_regressor",
        "intercept": 100.0,
        "coefficients": [0.0, -0.01, 0.0, 0.0, 0.0, 0.0, 0.0]
    }));
    write(dir, "bhi/abuse_model.json", json!({
        "kind": "logistic_classifier",
        "intercept": -5.0,
        "coefficients": [10.0, 0.0, 0.0, 0.0, 0.0]
    }));
    write(dir, "charging/model.json", json!({
        "kind": "logistic_classifier",
        "intercept": 0.0,
        "coefficients": [-1.0, 0.0]
    }));
    write(dir, "charging/scaler.json", json!({
        "kind": "standard_scaler",
        "mean": [0.5, 0.5],
        "scale": [0.25, 0.25]
    }));
    write(dir, "charging/labels.json", json!(["Abusive", "Normal"]));
    write(dir, "charging/features.json", json!(["fast_charge_share", "end_soc"]));
    write(dir, "driving/stress_score.json", json!({
        "kind": "linear_regressor",
        "intercept": 10.0,
        "coefficients": [0.5, 0.1, 0.0, 1.0, 0.0]
    }));
    write(dir, "driving/stress_class.json", json!({
        "kind": "multiclass_classifier",
        "intercepts": [0.0, 1.0, 0.5],
        "coefficients": [
            [0.02, 0.0, 0.0, 0.0, 0.0],
            [-0.02, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0]
        ]
    }));
    write(dir, "driving/label_encoder.json", json!({
        "kind": "label_encoder",
        "classes": ["High", "Low", "Moderate"]
    }));

    let mut settings = Settings::default();
    let models = &mut settings.models;
    models.bhi.health = dir.join("bhi/bhi_model.json");
    models.bhi.abuse = dir.join("bhi/abuse_model.json");
    models.charging.model = dir.join("charging/model.json");
    models.charging.scaler = dir.join("charging/scaler.json");
    models.charging.labels = dir.join("charging/labels.json");
    models.charging.features = dir.join("charging/features.json");
    models.driving.stress_score = dir.join("driving/stress_score.json");
    models.driving.stress_class = dir.join("driving/stress_class.json");
    models.driving.label_encoder = dir.join("driving/label_encoder.json");
    settings
}

#[tokio::test]
async fn test_engine_loaded_from_json_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let settings = artifact_settings(dir.path());
    let engine = InferenceEngine::load(&settings.models).unwrap();
    let router = || app(InferenceEngine::load(&settings.models).unwrap());

    // cycles=500 -> raw 95; fast charge 0.3 -> abuse 0
    let (_, gentle) = send(router(), "POST", "/api/v1/bhi", Some(json!({"fast_charge_ratio": 0.3}))).await;
    assert_eq!(gentle["abuse_flag"], 0.0);
    assert_eq!(gentle["tier"], "healthy");

    // fast charge 0.9 -> abuse 1 -> 95 * 0.75
    let (_, abused) = send(router(), "POST", "/api/v1/bhi", Some(json!({"fast_charge_ratio": 0.9}))).await;
    assert_eq!(abused["abuse_flag"], 1.0);
    assert_eq!(abused["metric"], "71.25");
    assert_eq!(abused["tier"], "moderate");

    // high fast-charge share scales above the mean -> class 0
    let (_, charging) = send(
        router(),
        "POST",
        "/api/v1/charging",
        Some(json!({"values": {"fast_charge_share": 0.9}})),
    )
    .await;
    assert_eq!(charging["status"], "Abusive");

    let (_, driving) = send(
        router(),
        "POST",
        "/api/v1/driving",
        Some(json!({"average_current": 10.0})),
    )
    .await;
    assert_eq!(driving["abuse_level"], "Low");
    assert_eq!(driving["stress_score"], 15.0);

    assert_eq!(engine.charging_schema().len(), 2);
    assert_eq!(engine.model_kinds()[0], ("bhi_health", "linear_regressor"));
    assert!(engine
        .model_kinds()
        .contains(&("charging_classifier", "logistic_classifier")));
}

#[test]
fn test_missing_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = artifact_settings(dir.path());
    settings.models.bhi.health = dir.path().join("bhi/missing.json");

    assert!(InferenceEngine::load(&settings.models).is_err());
}

#[test]
fn test_constant_predictor_is_input_agnostic() {
    let p = ConstantPredictor(12.0);
    assert_eq!(p.predict(&[]).unwrap(), 12.0);
    assert_eq!(p.predict(&[1.0; 7]).unwrap(), 12.0);
}
