//! About Route

use advisor::{Banner, BannerLevel};
use axum::Json;
use serde::Serialize;

/// Project description
#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub title: &'static str,
    pub banner: Banner,
    pub capabilities: Vec<&'static str>,
    pub modules: Vec<&'static str>,
}

/// Describe the project
pub async fn get_about() -> Json<AboutResponse> {
    Json(AboutResponse {
        title: "EV Battery Abuse & Health Intelligence System",
        banner: Banner::new(
            BannerLevel::Info,
            "Three pre-trained models in one platform to help drivers protect EV batteries \
             and promote sustainable EV usage.",
        ),
        capabilities: vec![
            "Detect charging and driving abuse",
            "Predict Battery Health Index (BHI)",
            "Provide eco-friendly recommendations",
        ],
        modules: vec![
            "Battery Health Index",
            "Charging Abuse Actions",
            "Driving & Electrical Abuse",
        ],
    })
}
