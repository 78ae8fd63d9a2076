//! Configuration loading and typed config structures for the Arcade backend.
//!
//! The canonical configuration lives in `arcade-config.yaml` at the project
//! root. Every field has a default, so an empty or missing file yields a
//! working service: 1000 starting credits, level 1, a 2x coin-flip payout,
//! listening on port 3000.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use arcade_types::Session;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `arcade-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArcadeConfig {
    /// HTTP listener and asset locations.
    #[serde(default)]
    pub server: ServerSection,

    /// Game rules: starting state and payout.
    #[serde(default)]
    pub rules: RulesConfig,
}

impl ArcadeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `PORT` overrides `server.port`
    /// - `ARCADE_API_KEY` overrides `server.api_key`
    /// - `ARCADE_GAME_CONFIG` overrides `server.game_config_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file), except that a missing file
    /// is not an error.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        let mut config = Self::default();
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Does not consult the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()
    }
}

/// HTTP server configuration.
///
/// `Debug` redacts the API key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret expected in the `x-api-key` header. When absent,
    /// requests are not gated.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// JSON game presentation document served by `GET /config`.
    #[serde(default = "default_game_config_path")]
    pub game_config_path: PathBuf,
}

impl ServerSection {
    /// Override server settings with environment variables when set.
    ///
    /// An unparsable `PORT` is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid PORT"),
            }
        }
        if let Ok(val) = std::env::var("ARCADE_API_KEY") {
            self.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("ARCADE_GAME_CONFIG") {
            self.game_config_path = PathBuf::from(val);
        }
    }
}

impl std::fmt::Debug for ServerSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("static_dir", &self.static_dir)
            .field("game_config_path", &self.game_config_path)
            .finish()
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
            static_dir: default_static_dir(),
            game_config_path: default_game_config_path(),
        }
    }
}

/// Game rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulesConfig {
    /// Credits a fresh session starts with.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,

    /// Level a fresh session starts at.
    #[serde(default = "default_starting_level")]
    pub starting_level: u32,

    /// A winning round pays `bet * payout_multiplier`.
    #[serde(default = "default_payout_multiplier")]
    pub payout_multiplier: u64,

    /// Probability in `[0, 1]` that a round is won.
    #[serde(default = "default_win_probability")]
    pub win_probability: f64,

    /// Fixed RNG seed. Unset means seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Sessions kept in memory. Starting one more evicts the oldest.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl RulesConfig {
    /// Build the session that start and reset install.
    pub const fn fresh_session(&self) -> Session {
        Session::new(self.starting_balance, self.starting_level)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err(ConfigError::Invalid {
                field: "rules.win_probability",
                reason: format!("{} is not within [0, 1]", self.win_probability),
            });
        }
        if self.payout_multiplier == 0 {
            return Err(ConfigError::Invalid {
                field: "rules.payout_multiplier",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::Invalid {
                field: "rules.max_sessions",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            starting_level: default_starting_level(),
            payout_multiplier: default_payout_multiplier(),
            win_probability: default_win_probability(),
            seed: None,
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_game_config_path() -> PathBuf {
    PathBuf::from("public/game_init.conf")
}

const fn default_starting_balance() -> u64 {
    1000
}

const fn default_starting_level() -> u32 {
    1
}

const fn default_payout_multiplier() -> u64 {
    2
}

const fn default_win_probability() -> f64 {
    0.5
}

const fn default_max_sessions() -> usize {
    10_000
}
