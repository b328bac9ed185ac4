//! Temporal smoothing of the blended hue.
//!
//! A fixed-capacity FIFO history, prefilled with zeros, is reduced to one
//! output per update by the configured method. The method is parsed once at
//! construction so an unknown name never surfaces mid-stream.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use hueshift_common::config::ProcessingConfig;
use hueshift_common::error::{HueshiftError, HueshiftResult};

/// Fixed alpha for exponential smoothing.
pub const EXPONENTIAL_ALPHA: f64 = 0.3;

/// Default history capacity.
pub const DEFAULT_WINDOW: usize = 10;

/// Available smoothing methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SmoothingMethod {
    /// Arithmetic mean of the history.
    #[default]
    SimpleAverage,

    /// Weights `1..=N` from oldest to newest, normalized by their sum.
    WeightedAverage,

    /// EMA recomputed from the start of the history with
    /// [`EXPONENTIAL_ALPHA`].
    ExponentialSmoothing,
}

impl SmoothingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleAverage => "simple_average",
            Self::WeightedAverage => "weighted_average",
            Self::ExponentialSmoothing => "exponential_smoothing",
        }
    }

    /// Reduce a history to one value. Empty histories yield `0.0`.
    pub fn reduce<'a>(&self, history: impl IntoIterator<Item = &'a f64>) -> f64 {
        let values: Vec<f64> = history.into_iter().copied().collect();
        if values.is_empty() {
            return 0.0;
        }
        match self {
            Self::SimpleAverage => values.iter().sum::<f64>() / values.len() as f64,
            Self::WeightedAverage => {
                let (weighted, total) = values
                    .iter()
                    .enumerate()
                    .fold((0.0, 0.0), |(acc, total), (i, v)| {
                        let w = (i + 1) as f64;
                        (acc + v * w, total + w)
                    });
                weighted / total
            }
            Self::ExponentialSmoothing => values[1..].iter().fold(values[0], |s, v| {
                EXPONENTIAL_ALPHA * v + (1.0 - EXPONENTIAL_ALPHA) * s
            }),
        }
    }
}

impl FromStr for SmoothingMethod {
    type Err = HueshiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple_average" => Ok(Self::SimpleAverage),
            "weighted_average" => Ok(Self::WeightedAverage),
            "exponential_smoothing" => Ok(Self::ExponentialSmoothing),
            other => Err(HueshiftError::UnknownSmoothingMethod {
                method: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling-history smoother.
#[derive(Debug, Clone)]
pub struct Smoother {
    method: SmoothingMethod,
    capacity: usize,
    history: VecDeque<f64>,
}

impl Smoother {
    /// Create a smoother with a zero-filled history of `capacity` entries.
    pub fn new(method: SmoothingMethod, capacity: usize) -> HueshiftResult<Self> {
        if capacity == 0 {
            return Err(HueshiftError::config("smoothing window size must be at least 1"));
        }
        Ok(Self {
            method,
            capacity,
            history: std::iter::repeat(0.0).take(capacity).collect(),
        })
    }

    /// Build from the processing section of the app config.
    pub fn from_config(config: &ProcessingConfig) -> HueshiftResult<Self> {
        let method = config.smoothing_method.parse()?;
        Self::new(method, config.smoothing_window_size)
    }

    /// Push a value, evicting the oldest, and return the smoothed output.
    pub fn smooth(&mut self, value: f64) -> f64 {
        self.history.push_back(value);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.method.reduce(&self.history)
    }

    pub fn method(&self) -> SmoothingMethod {
        self.method
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// History from oldest to newest.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// Refill the history with zeros.
    pub fn reset(&mut self) {
        self.history.iter_mut().for_each(|v| *v = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_average_ramps_from_zero() {
        let mut smoother = Smoother::new(SmoothingMethod::SimpleAverage, 3).unwrap();
        let out: Vec<f64> = [0.9, 0.9, 0.9].iter().map(|&v| smoother.smooth(v)).collect();
        assert!((out[0] - 0.3).abs() < 1e-12);
        assert!((out[1] - 0.6).abs() < 1e-12);
        assert!((out[2] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_average_favors_recent() {
        let mut smoother = Smoother::new(SmoothingMethod::WeightedAverage, 3).unwrap();
        // History [0, 0, 1] with weights 1, 2, 3
        let out = smoother.smooth(1.0);
        assert!((out - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_recomputes_from_start() {
        let mut smoother = Smoother::new(SmoothingMethod::ExponentialSmoothing, 2).unwrap();
        // History [0, 1]: s = 0.3 * 1 + 0.7 * 0
        assert!((smoother.smooth(1.0) - 0.3).abs() < 1e-12);
        // History [1, 1]: s0 = 1
        assert!((smoother.smooth(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_history_is_fixed_capacity() {
        let mut smoother = Smoother::new(SmoothingMethod::SimpleAverage, 4).unwrap();
        for v in [0.1, 0.2, 0.3, 0.4, 0.5, 0.6] {
            smoother.smooth(v);
        }
        let history: Vec<f64> = smoother.history().collect();
        assert_eq!(history, vec![0.3, 0.4, 0.5, 0.6]);

        smoother.reset();
        assert!(smoother.history().all(|v| v == 0.0));
        assert_eq!(smoother.history().count(), 4);
    }

    #[test]
    fn test_method_names_parse() {
        for method in [
            SmoothingMethod::SimpleAverage,
            SmoothingMethod::WeightedAverage,
            SmoothingMethod::ExponentialSmoothing,
        ] {
            assert_eq!(method.as_str().parse::<SmoothingMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_is_config_error() {
        let err = "median".parse::<SmoothingMethod>().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("median"));

        let config = ProcessingConfig {
            smoothing_method: "kalman".into(),
            ..Default::default()
        };
        assert!(Smoother::from_config(&config).is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Smoother::new(SmoothingMethod::SimpleAverage, 0).is_err());
    }

    #[test]
    fn test_default_config_builds_default_smoother() {
        let smoother = Smoother::from_config(&ProcessingConfig::default()).unwrap();
        assert_eq!(smoother.method(), SmoothingMethod::SimpleAverage);
        assert_eq!(smoother.capacity(), DEFAULT_WINDOW);
    }
}
