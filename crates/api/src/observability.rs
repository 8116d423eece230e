//! Logging and metrics setup

use crate::settings::{LogFormat, LoggingSettings};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Counter of completed predictions, labelled by module
pub const PREDICTIONS_TOTAL: &str = "evbi_predictions_total";

/// Counter of failed predictions, labelled by module
pub const PREDICTION_ERRORS_TOTAL: &str = "evbi_prediction_errors_total";

/// Initialize logging.
///
/// Falls back to INFO on an unparsable level. A second call leaves the first
/// subscriber in place.
pub fn init_logging(settings: &LoggingSettings) {
    let level = settings.max_level().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = match settings.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already set: {}", e);
    }
}

/// Install the Prometheus recorder
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    }
}

/// Count a prediction outcome for a module
pub fn record_prediction(module: &'static str, ok: bool) {
    if ok {
        metrics::counter!(PREDICTIONS_TOTAL, "module" => module).increment(1);
    } else {
        metrics::counter!(PREDICTION_ERRORS_TOTAL, "module" => module).increment(1);
    }
}
