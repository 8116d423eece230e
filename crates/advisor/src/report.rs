//! Per-module result views

use crate::rules::{adjust_bhi, advise_bhi, advise_charging, advise_driving};
use crate::tier::{format_metric, progress_value, Banner, BannerLevel, HealthTier};
use serde::{Deserialize, Serialize};

/// Charging status label that raises the abuse banner
const ABUSIVE_STATUS: &str = "Abusive";

/// Battery health result as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BhiReport {
    pub raw_index: f64,
    pub abuse_flag: f64,
    /// Index after the abuse penalty; drives everything below
    pub adjusted_index: f64,
    pub metric: String,
    pub progress: u8,
    pub tier: HealthTier,
    pub banner: Banner,
    pub recommendation: String,
}

impl BhiReport {
    pub fn evaluate(raw_index: f64, abuse_flag: f64) -> Self {
        let adjusted_index = adjust_bhi(raw_index, abuse_flag);
        let tier = HealthTier::from_score(adjusted_index);
        Self {
            raw_index,
            abuse_flag,
            adjusted_index,
            metric: format_metric(adjusted_index),
            progress: progress_value(adjusted_index),
            tier,
            banner: tier.banner(),
            recommendation: advise_bhi(adjusted_index).to_string(),
        }
    }
}

/// Charging status result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingReport {
    pub status: String,
    pub banner: Banner,
    pub recommendation: String,
}

impl ChargingReport {
    /// The banner keys on `"Abusive"` while the advice keys on `"Normal"`,
    /// so a label that is neither gets a safe banner with abuse advice.
    pub fn evaluate(status: &str) -> Self {
        let banner = if status == ABUSIVE_STATUS {
            Banner::new(BannerLevel::Error, "Abusive Charging Detected")
        } else {
            Banner::new(BannerLevel::Success, "Charging is Safe")
        };
        Self {
            status: status.to_string(),
            banner,
            recommendation: advise_charging(status).to_string(),
        }
    }
}

/// Driving stress result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingReport {
    pub stress_score: f64,
    pub metric: String,
    pub abuse_level: String,
    pub recommendation: String,
}

impl DrivingReport {
    pub fn evaluate(stress_score: f64, abuse_level: &str) -> Self {
        Self {
            stress_score,
            metric: format_metric(stress_score),
            abuse_level: abuse_level.to_string(),
            recommendation: advise_driving(abuse_level).to_string(),
        }
    }
}
