//! Feature Vector Assembly

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

/// Number of features the battery health model consumes
pub const BHI_DIMENSION: usize = 7;

/// Columns of the BHI vector fed to the abuse model
/// (fast charge ratio through driving style coefficient)
pub const ABUSE_COLUMNS: Range<usize> = 2..7;

/// Number of features the driving stress models consume
pub const DRIVING_DIMENSION: usize = 5;

/// Value used for any charging feature the operator left blank
pub const CHARGING_DEFAULT_VALUE: f64 = 0.5;

/// Ordered feature vector handed to a predictor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values, in the order the model was fit on
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Borrow the values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector holds no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy a contiguous column range into a new vector.
    ///
    /// Columns past the end are dropped rather than padded, so a short vector
    /// reaches the model as-is and fails there.
    pub fn columns(&self, range: Range<usize>) -> FeatureVector {
        let end = range.end.min(self.values.len());
        let start = range.start.min(end);
        FeatureVector::new(self.values[start..end].to_vec())
    }
}

/// Driving style selected on the battery health form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingStyle {
    #[default]
    Conservative,
    Moderate,
    Aggressive,
}

impl DrivingStyle {
    /// All styles, in display order
    pub const ALL: [DrivingStyle; 3] = [
        DrivingStyle::Conservative,
        DrivingStyle::Moderate,
        DrivingStyle::Aggressive,
    ];

    /// Coefficient the health model was trained with for this style
    pub fn coefficient(&self) -> f64 {
        match self {
            DrivingStyle::Conservative => 0.2,
            DrivingStyle::Moderate => 0.5,
            DrivingStyle::Aggressive => 1.0,
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            DrivingStyle::Conservative => "Conservative",
            DrivingStyle::Moderate => "Moderate",
            DrivingStyle::Aggressive => "Aggressive",
        }
    }
}

/// Battery health form inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BhiInputs {
    /// Battery temperature (°C)
    pub temperature_c: f64,
    /// Charging cycles
    pub charging_cycles: f64,
    /// Fraction of charges done on a fast charger
    pub fast_charge_ratio: f64,
    /// Discharge rate (C)
    pub discharge_rate_c: f64,
    /// Vehicle age (months)
    pub vehicle_age_months: f64,
    /// Internal resistance (Ohm)
    pub internal_resistance_ohm: f64,
    /// Driving style
    pub driving_style: DrivingStyle,
}

impl Default for BhiInputs {
    fn default() -> Self {
        Self {
            temperature_c: 30.0,
            charging_cycles: 500.0,
            fast_charge_ratio: 0.3,
            discharge_rate_c: 1.2,
            vehicle_age_months: 24.0,
            internal_resistance_ohm: 0.03,
            driving_style: DrivingStyle::Conservative,
        }
    }
}

impl BhiInputs {
    /// Assemble the 7-wide health model vector
    pub fn to_vector(&self) -> FeatureVector {
        let values = vec![
            self.temperature_c,
            self.charging_cycles,
            self.fast_charge_ratio,
            self.discharge_rate_c,
            self.vehicle_age_months,
            self.internal_resistance_ohm,
            self.driving_style.coefficient(),
        ];
        debug!("Assembled BHI vector: {:?}", values);
        FeatureVector::new(values)
    }

    /// Assemble the 5-wide abuse model vector
    pub fn to_abuse_vector(&self) -> FeatureVector {
        self.to_vector().columns(ABUSE_COLUMNS)
    }
}

/// Driving and electrical stress form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingInputs {
    pub average_current: f64,
    pub peak_current: f64,
    pub minimum_voltage: f64,
    pub soc_drop: f64,
    pub ac_usage: f64,
}

impl DrivingInputs {
    /// Assemble the 5-wide driving vector
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector::new(vec![
            self.average_current,
            self.peak_current,
            self.minimum_voltage,
            self.soc_drop,
            self.ac_usage,
        ])
    }
}

/// Charging form inputs, either a raw vector or values keyed by feature name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChargingInputs {
    Vector {
        vector: Vec<f64>,
    },
    Named {
        #[serde(default)]
        values: HashMap<String, f64>,
    },
}

impl Default for ChargingInputs {
    fn default() -> Self {
        ChargingInputs::Named {
            values: HashMap::new(),
        }
    }
}

/// Ordered charging feature names, as shipped next to the charging model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargingSchema {
    names: Vec<String>,
}

impl ChargingSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Assemble the charging vector in schema order.
    ///
    /// Named values missing from the request take [`CHARGING_DEFAULT_VALUE`];
    /// names not in the schema are ignored. A raw vector passes through
    /// untouched.
    pub fn assemble(&self, inputs: &ChargingInputs) -> FeatureVector {
        match inputs {
            ChargingInputs::Vector { vector } => FeatureVector::new(vector.clone()),
            ChargingInputs::Named { values } => {
                let ignored = values
                    .keys()
                    .filter(|k| !self.names.iter().any(|n| n == *k))
                    .count();
                if ignored > 0 {
                    debug!("Ignoring {} charging values not in the feature list", ignored);
                }
                FeatureVector::new(
                    self.names
                        .iter()
                        .map(|name| values.get(name).copied().unwrap_or(CHARGING_DEFAULT_VALUE))
                        .collect(),
                )
            }
        }
    }
}
