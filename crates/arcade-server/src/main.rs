//! Arcade server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `arcade-config.yaml` (or `$ARCADE_CONFIG`)
//! 3. Load the game presentation config and build the shared state
//! 4. Serve HTTP until `Ctrl-C`

use std::path::PathBuf;
use std::sync::Arc;

use arcade_core::ArcadeConfig;
use arcade_server::{start_server, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "arcade-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("arcade-server starting");

    // 2. Load configuration.
    let config_path = std::env::var("ARCADE_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = ArcadeConfig::from_file_or_default(&config_path)?;
    info!(
        config_path = %config_path.display(),
        host = %config.server.host,
        port = config.server.port,
        starting_balance = config.rules.starting_balance,
        payout_multiplier = config.rules.payout_multiplier,
        win_probability = config.rules.win_probability,
        seeded = config.rules.seed.is_some(),
        "Configuration loaded"
    );
    if config.server.api_key.is_none() {
        warn!("no API key configured, requests are not gated");
    }

    // 3. Build shared state.
    let state = Arc::new(AppState::from_config(&config)?);

    // 4. Serve.
    start_server(&config.server, state).await?;

    Ok(())
}
