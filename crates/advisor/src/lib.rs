//! Battery Advice Rules
//!
//! Maps model outputs to the fixed advice strings and display tiers shown on
//! the dashboard. Everything here is a pure, total function.

mod report;
mod rules;
mod tier;

pub use report::{BhiReport, ChargingReport, DrivingReport};
pub use rules::{
    adjust_bhi, advise_bhi, advise_charging, advise_driving, is_known_charging_status,
    is_known_driving_level, HealthBracket, ABUSE_PENALTY, CHARGING_STATUSES, DRIVING_LEVELS,
    GENTLE_USE_MIN, HEALTHY_MIN, MODERATE_MIN,
};
pub use tier::{format_metric, progress_value, Banner, BannerLevel, HealthTier};
