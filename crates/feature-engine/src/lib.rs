//! Feature Engineering Engine
//!
//! Turns operator-entered scalars into the fixed-order feature vectors the
//! battery health, charging and driving models were fit on.

mod features;
mod inputs;

pub use features::{
    BhiInputs, ChargingInputs, ChargingSchema, DrivingInputs, DrivingStyle, FeatureVector,
    ABUSE_COLUMNS, BHI_DIMENSION, CHARGING_DEFAULT_VALUE, DRIVING_DIMENSION,
};
pub use inputs::{bhi_input_specs, charging_input_specs, driving_input_specs, InputKind, InputSpec};
