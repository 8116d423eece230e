//! Input Specifications
//!
//! Describes the form controls for each module. Ranges are advisory: they
//! tell the dashboard how to draw a slider, nothing here rejects a value.

use crate::features::{DrivingStyle, CHARGING_DEFAULT_VALUE};
use serde::{Deserialize, Serialize};

/// Kind of form control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    /// Bounded slider
    Slider { min: f64, max: f64, default: f64 },
    /// Free number entry
    Number { default: f64 },
    /// One of a fixed set of options
    Choice { options: Vec<String>, default: String },
}

/// A single form control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Field name in the request body
    pub key: String,
    /// Human readable label
    pub label: String,
    #[serde(flatten)]
    pub kind: InputKind,
}

impl InputSpec {
    fn slider(key: &str, label: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: InputKind::Slider { min, max, default },
        }
    }

    fn number(key: &str, label: &str, default: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: InputKind::Number { default },
        }
    }
}

/// Controls for the battery health form
pub fn bhi_input_specs() -> Vec<InputSpec> {
    vec![
        InputSpec::slider("temperature_c", "Battery Temperature (°C)", 10.0, 50.0, 30.0),
        InputSpec::slider("charging_cycles", "Charging Cycles", 0.0, 3000.0, 500.0),
        InputSpec::slider("fast_charge_ratio", "Fast Charge Ratio", 0.0, 1.0, 0.3),
        InputSpec::slider("discharge_rate_c", "Discharge Rate (C)", 0.5, 3.0, 1.2),
        InputSpec::slider("vehicle_age_months", "Vehicle Age (Months)", 0.0, 120.0, 24.0),
        InputSpec::slider(
            "internal_resistance_ohm",
            "Internal Resistance (Ohm)",
            0.01,
            0.1,
            0.03,
        ),
        InputSpec {
            key: "driving_style".to_string(),
            label: "Driving Style".to_string(),
            kind: InputKind::Choice {
                options: DrivingStyle::ALL.iter().map(|s| s.as_str().to_string()).collect(),
                default: DrivingStyle::default().as_str().to_string(),
            },
        },
    ]
}

/// Controls for the charging form, one number entry per feature name
pub fn charging_input_specs(names: &[String]) -> Vec<InputSpec> {
    names
        .iter()
        .map(|name| InputSpec::number(name, name, CHARGING_DEFAULT_VALUE))
        .collect()
}

/// Controls for the driving form
pub fn driving_input_specs() -> Vec<InputSpec> {
    vec![
        InputSpec::number("average_current", "Average Current", 0.0),
        InputSpec::number("peak_current", "Peak Current", 0.0),
        InputSpec::number("minimum_voltage", "Minimum Voltage", 0.0),
        InputSpec::number("soc_drop", "SOC Drop", 0.0),
        InputSpec::number("ac_usage", "AC Usage", 0.0),
    ]
}
