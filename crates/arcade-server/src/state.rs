//! Shared application state for the Arcade API server.
//!
//! [`AppState`] holds the game engine behind a read-write lock, the opaque
//! game presentation document served by `GET /config`, and the settings the
//! router needs (API key, static asset directory).

use std::path::{Path, PathBuf};

use arcade_core::{Arcade, ArcadeConfig, RandomOutcomeSource};
use rand::distr::BernoulliError;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Errors that can occur while assembling the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The configured win probability cannot drive a coin flip.
    #[error("invalid win probability: {0}")]
    WinProbability(#[from] BernoulliError),
}

/// Errors reading the game presentation document.
#[derive(Debug, thiserror::Error)]
pub enum GameConfigError {
    /// The file could not be read.
    #[error("failed to read game config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Every mutating handler takes the write lock on
/// [`arcade`](Self::arcade) for the duration of one action, so actions
/// never interleave. `Debug` redacts the API key.
pub struct AppState {
    /// The game engine and all sessions.
    pub arcade: RwLock<Arcade>,
    /// Game presentation document, passed through unmodified. `None` when
    /// it could not be loaded; served as JSON `null`.
    pub game_config: Option<Value>,
    /// Expected `x-api-key` value. `None` disables gating.
    pub api_key: Option<String>,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("arcade", &self.arcade)
            .field("game_config", &self.game_config)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl AppState {
    /// Create state around an engine, with no game config, no API key, and
    /// the default static directory.
    pub fn new(arcade: Arcade) -> Self {
        Self {
            arcade: RwLock::new(arcade),
            game_config: None,
            api_key: None,
            static_dir: PathBuf::from("public"),
        }
    }

    /// Build the production state from loaded configuration.
    ///
    /// The outcome source is a [`RandomOutcomeSource`] using the configured
    /// win probability and seed. A missing or malformed game config is
    /// logged and tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WinProbability`] if the configured probability
    /// is outside `[0, 1]`.
    pub fn from_config(config: &ArcadeConfig) -> Result<Self, StateError> {
        let outcomes =
            RandomOutcomeSource::new(config.rules.win_probability, config.rules.seed)?;
        let arcade = Arcade::new(config.rules.clone(), Box::new(outcomes));

        Ok(Self::new(arcade)
            .with_game_config(load_game_config(&config.server.game_config_path))
            .with_api_key(config.server.api_key.clone())
            .with_static_dir(config.server.static_dir.clone()))
    }

    /// Attach the game presentation document.
    #[must_use]
    pub fn with_game_config(mut self, game_config: Option<Value>) -> Self {
        self.game_config = game_config;
        self
    }

    /// Require `api_key` in the `x-api-key` header of every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Serve static assets from `static_dir`.
    #[must_use]
    pub fn with_static_dir(mut self, static_dir: PathBuf) -> Self {
        self.static_dir = static_dir;
        self
    }
}

/// Read the game presentation document from `path`.
///
/// # Errors
///
/// Returns [`GameConfigError`] if the file cannot be read or parsed.
pub fn read_game_config(path: &Path) -> Result<Value, GameConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read the game presentation document, logging and swallowing failures.
pub fn load_game_config(path: &Path) -> Option<Value> {
    match read_game_config(path) {
        Ok(value) => {
            info!(path = %path.display(), "game config loaded");
            Some(value)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "game config unavailable, serving null");
            None
        }
    }
}
