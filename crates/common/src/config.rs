//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HueshiftError, HueshiftResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pipeline tuning consumed at construction time.
    pub processing: ProcessingConfig,

    /// Outbound emission settings.
    pub output: OutputConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Optional path to an expression profile JSON file.
    /// `None` selects the built-in catalog.
    pub profile: Option<PathBuf>,
}

/// Pipeline tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of hue samples kept in the smoothing window.
    pub smoothing_window_size: usize,

    /// Smoothing method name: `simple_average`, `weighted_average` or
    /// `exponential_smoothing`. Validated when the pipeline is built.
    pub smoothing_method: String,

    /// Minimum interval between two emissions (milliseconds).
    pub throttle_ms: u64,

    /// How long the consumer waits for an event before logging an idle
    /// period (milliseconds).
    pub idle_timeout_ms: u64,

    /// Capacity of the producer-to-consumer event queue.
    pub queue_capacity: usize,
}

/// Outbound emission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Avatar parameter name stamped on every emitted record.
    pub parameter: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hueshift=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path (appended to).
    pub file: Option<PathBuf>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            smoothing_window_size: 10,
            smoothing_method: "simple_average".to_string(),
            throttle_ms: 1000,
            idle_timeout_ms: 5000,
            queue_capacity: 1024,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            parameter: "HueShift".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], any
    /// failure is reported to the caller.
    pub fn load_from(path: impl AsRef<Path>) -> HueshiftResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HueshiftError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HueshiftError::config(format!("invalid config {}: {e}", path.display())))
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HueshiftResult<()> {
        self.save_to(config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> HueshiftResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("hueshift").join("config.json")
}
