//! Clock utilities for emission timestamps.
//!
//! The pipeline works in integer milliseconds since the consumer started.
//! A monotonic epoch is captured once; all throttling decisions compare
//! values produced by the same clock.

use std::time::{Duration, Instant};

/// A monotonic clock anchored at pipeline start.
#[derive(Debug, Clone)]
pub struct PipelineClock {
    /// The instant the pipeline started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl PipelineClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since the clock started.
    pub fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Wall-clock time at start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert a millisecond count into a `Duration`.
    pub fn ms_to_duration(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }
}
