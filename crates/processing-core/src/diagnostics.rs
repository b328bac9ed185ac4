//! Observational counters. Nothing in the pipeline reads these back.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineDiagnostics {
    pub total_events: u64,
    pub recognized_events: u64,
    pub unrecognized_events: u64,
    /// Values that were non-finite or outside `[-1, 1]`.
    pub malformed_values: u64,
    pub emissions: u64,
    pub idle_timeouts: u64,
    /// Raw unrecognized name -> number of occurrences.
    pub unrecognized_names: HashMap<String, u64>,
}

impl PipelineDiagnostics {
    /// Count one unrecognized name. Returns `true` on its first occurrence.
    pub fn record_unrecognized(&mut self, name: &str) -> bool {
        self.unrecognized_events += 1;
        let count = self.unrecognized_names.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Most frequent unrecognized names, ties broken by name.
    pub fn top_unrecognized(&self, n: usize) -> Vec<(&str, u64)> {
        let mut names: Vec<(&str, u64)> = self
            .unrecognized_names
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        names.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        names.truncate(n);
        names
    }

    /// Fraction of events that resolved, `0.0` before any event.
    pub fn recognition_rate(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            self.recognized_events as f64 / self.total_events as f64
        }
    }
}
