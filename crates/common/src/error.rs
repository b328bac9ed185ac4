//! Error types shared across HueShift crates.

use std::path::PathBuf;

/// Top-level error type for HueShift operations.
#[derive(Debug, thiserror::Error)]
pub enum HueshiftError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown smoothing method: {method:?} (expected simple_average, weighted_average or exponential_smoothing)")]
    UnknownSmoothingMethod { method: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Event stream error: {message}")]
    Stream { message: String },

    #[error("Sink error: {message}")]
    Sink { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HueshiftError.
pub type HueshiftResult<T> = Result<T, HueshiftError>;

impl HueshiftError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream {
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    /// Whether this error was raised while validating configuration.
    ///
    /// Configuration errors are the only ones allowed to stop the pipeline
    /// from starting.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::UnknownSmoothingMethod { .. }
        )
    }
}
