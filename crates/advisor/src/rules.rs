//! Advice Rules

use serde::{Deserialize, Serialize};

/// Lowest health index still considered healthy
pub const HEALTHY_MIN: f64 = 85.0;
/// Lowest health index in the moderate bracket
pub const MODERATE_MIN: f64 = 70.0;
/// Lowest health index that only needs gentle use
pub const GENTLE_USE_MIN: f64 = 50.0;

/// Fraction of the health index removed when abuse is detected
pub const ABUSE_PENALTY: f64 = 0.25;

/// Charging labels the classifier is trained to emit
pub const CHARGING_STATUSES: [&str; 2] = ["Normal", "Abusive"];
/// Driving stress labels the classifier is trained to emit
pub const DRIVING_LEVELS: [&str; 3] = ["Low", "Moderate", "High"];

const CHARGING_SAFE: &str = "Charging behavior is safe. Keep using normal charging.";
const CHARGING_ABUSE: &str =
    "Avoid fast charging above 80%, and do not charge at high temperature.";

const DRIVING_LOW: &str = "Driving behavior is safe. Keep driving smoothly.";
const DRIVING_MODERATE: &str = "Avoid harsh acceleration and braking.";
const DRIVING_AGGRESSIVE: &str = "Aggressive driving is damaging the battery. Drive gently.";

/// Advice bracket for a health index.
///
/// Brackets are closed-open and checked from the top; anything that fails
/// every lower bound (including NaN) is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBracket {
    Healthy,
    Moderate,
    GentleUse,
    Critical,
}

impl HealthBracket {
    pub fn from_score(score: f64) -> Self {
        if score >= HEALTHY_MIN {
            HealthBracket::Healthy
        } else if score >= MODERATE_MIN {
            HealthBracket::Moderate
        } else if score >= GENTLE_USE_MIN {
            HealthBracket::GentleUse
        } else {
            HealthBracket::Critical
        }
    }

    /// Advice for this bracket
    pub fn recommendation(&self) -> &'static str {
        match self {
            HealthBracket::Healthy => "Battery is healthy. Continue eco-friendly charging.",
            HealthBracket::Moderate => "Reduce fast charging and avoid overheating.",
            HealthBracket::GentleUse => "Use slow charging and drive gently to protect battery.",
            HealthBracket::Critical => {
                "Battery is critical. Use AC charging only and visit service center."
            }
        }
    }
}

/// Advice for a (penalty-adjusted) health index
pub fn advise_bhi(score: f64) -> &'static str {
    HealthBracket::from_score(score).recommendation()
}

/// Discount a raw health index by the abuse flag.
///
/// `abuse` is normally 0 or 1; a probability in between scales the penalty
/// linearly.
pub fn adjust_bhi(raw: f64, abuse: f64) -> f64 {
    raw * (1.0 - ABUSE_PENALTY * abuse)
}

/// Advice for a charging status label.
///
/// Only the exact label `"Normal"` is safe; every other label, known or not,
/// gets the abuse advice.
pub fn advise_charging(status: &str) -> &'static str {
    if status == "Normal" {
        CHARGING_SAFE
    } else {
        CHARGING_ABUSE
    }
}

/// Whether a charging label is one the advice was written for
pub fn is_known_charging_status(status: &str) -> bool {
    CHARGING_STATUSES.contains(&status)
}

/// Whether a driving label is one the advice was written for
pub fn is_known_driving_level(label: &str) -> bool {
    DRIVING_LEVELS.contains(&label)
}

/// Advice for a driving stress label.
///
/// Labels other than `"Low"` and `"Moderate"` get the aggressive-driving
/// warning.
pub fn advise_driving(label: &str) -> &'static str {
    match label {
        "Low" => DRIVING_LOW,
        "Moderate" => DRIVING_MODERATE,
        _ => DRIVING_AGGRESSIVE,
    }
}
