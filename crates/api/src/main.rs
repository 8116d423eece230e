//! EV Battery Intelligence - Main Entry Point
//!
//! Usage: `ev-battery-intel [CONFIG_FILE]`

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref())?;
    init_logging(&settings.logging);

    info!("=== EV Battery Intelligence v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Loading models and starting dashboard API...");

    run_server(settings).await?;

    Ok(())
}
