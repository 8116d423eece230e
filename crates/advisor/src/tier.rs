//! Display Tiers and Banners

use crate::rules::{HEALTHY_MIN, MODERATE_MIN};
use serde::{Deserialize, Serialize};

/// Severity tier shown next to the health index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Healthy,
    Moderate,
    Degrading,
}

impl HealthTier {
    /// Tier for a health index, sharing thresholds with the advice brackets
    pub fn from_score(score: f64) -> Self {
        if score >= HEALTHY_MIN {
            HealthTier::Healthy
        } else if score >= MODERATE_MIN {
            HealthTier::Moderate
        } else {
            HealthTier::Degrading
        }
    }

    pub fn banner(&self) -> Banner {
        match self {
            HealthTier::Healthy => Banner::new(BannerLevel::Success, "Healthy Battery"),
            HealthTier::Moderate => Banner::new(BannerLevel::Warning, "Moderate Battery"),
            HealthTier::Degrading => Banner::new(BannerLevel::Error, "Battery Degrading"),
        }
    }
}

/// Banner color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
    Info,
}

impl BannerLevel {
    /// Traffic-light color for the banner
    pub fn color(&self) -> &'static str {
        match self {
            BannerLevel::Success => "green",
            BannerLevel::Warning => "yellow",
            BannerLevel::Error => "red",
            BannerLevel::Info => "blue",
        }
    }
}

/// Colored status banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub level: BannerLevel,
    /// Display color of `level`
    pub color: String,
    pub message: String,
}

impl Banner {
    pub fn new(level: BannerLevel, message: &str) -> Self {
        Self {
            level,
            color: level.color().to_string(),
            message: message.to_string(),
        }
    }
}

/// Progress bar value: `clamp(floor(score), 0, 100)`, NaN shows as 0
pub fn progress_value(score: f64) -> u8 {
    // float-to-int casts saturate and map NaN to 0
    score.floor().clamp(0.0, 100.0) as u8
}

/// Metric text with two decimals
pub fn format_metric(value: f64) -> String {
    format!("{:.2}", value)
}
