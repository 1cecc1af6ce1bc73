//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Synthetic usage simulator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Sampling interval of the generated feeds, in seconds
    #[serde(default = "default_feed_interval")]
    pub feed_interval_secs: f64,

    /// How much history to backfill at startup, in days
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// RNG seed; identical seeds reproduce identical feeds
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Keep posting fresh samples while the server runs
    #[serde(default = "default_live")]
    pub live: bool,

    /// Always-on household load in watts
    #[serde(default = "default_base_load")]
    pub base_load_watts: f64,

    /// Peak-to-trough swing of the daily demand curve, in watts
    #[serde(default = "default_daytime_swing")]
    pub daytime_swing_watts: f64,
}

fn default_feed_interval() -> f64 {
    10.0
}

fn default_history_days() -> u32 {
    7
}

fn default_seed() -> u64 {
    42
}

fn default_live() -> bool {
    true
}

fn default_base_load() -> f64 {
    220.0
}

fn default_daytime_swing() -> f64 {
    450.0
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            feed_interval_secs: default_feed_interval(),
            history_days: default_history_days(),
            seed: default_seed(),
            live: default_live(),
            base_load_watts: default_base_load(),
            daytime_swing_watts: default_daytime_swing(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("emonsim").join("config.toml")),
            Some(PathBuf::from("/etc/emonsim/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("EMONSIM_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("EMONSIM_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(interval) = std::env::var("EMONSIM_FEED_INTERVAL") {
            if let Ok(i) = interval.parse() {
                self.simulator.feed_interval_secs = i;
            }
        }
        if let Ok(days) = std::env::var("EMONSIM_HISTORY_DAYS") {
            if let Ok(d) = days.parse() {
                self.simulator.history_days = d;
            }
        }
        if let Ok(seed) = std::env::var("EMONSIM_SEED") {
            if let Ok(s) = seed.parse() {
                self.simulator.seed = s;
            }
        }
        if let Ok(live) = std::env::var("EMONSIM_LIVE") {
            self.simulator.live = live.to_lowercase() != "false" && live != "0";
        }

        if let Ok(level) = std::env::var("EMONSIM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("EMONSIM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# emonsim Configuration
#
# Environment variables override these settings:
# - EMONSIM_HOST
# - EMONSIM_PORT
# - EMONSIM_FEED_INTERVAL
# - EMONSIM_HISTORY_DAYS
# - EMONSIM_SEED
# - EMONSIM_LIVE
# - EMONSIM_LOG_LEVEL
# - EMONSIM_LOG_FORMAT

[api]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 8080

[simulator]
# Sampling interval of the generated feeds (seconds)
feed_interval_secs = 10.0

# Days of history to backfill at startup
history_days = 7

# RNG seed; the same seed reproduces the same feeds
seed = 42

# Keep posting fresh samples while the server runs
live = true

# Always-on household load (watts)
base_load_watts = 220.0

# Peak-to-trough swing of the daily demand curve (watts)
daytime_swing_watts = 450.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
