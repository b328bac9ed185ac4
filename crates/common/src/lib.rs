//! HueShift Common Utilities
//!
//! Shared infrastructure for all HueShift crates:
//! - Error types and result aliases
//! - Pipeline clock for emission timestamps
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
