//! Emotion definitions, the hue table, and diagnostic color bands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved name of the computed residual emotion.
pub const NEUTRAL: &str = "neutral";

/// A named, weighted combination of canonical parameters.
///
/// A positive weight contributes `value * weight`; a negative weight
/// contributes `(1 - value) * |weight|`, so the emotion is expressed by
/// the parameter being low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionDefinition {
    /// Emotion name, e.g. `"happy"`. Never `"neutral"`.
    pub name: String,

    /// Canonical parameter name -> signed weight.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl EmotionDefinition {
    /// Create a definition with no weights.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: BTreeMap::new(),
        }
    }

    /// Builder-style weight insertion.
    pub fn with_weight(mut self, parameter: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(parameter.into(), weight);
        self
    }
}

/// Emotion name -> hue in `[0.0, 1.0]`, including `"neutral"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionHueTable {
    hues: BTreeMap<String, f64>,
}

impl EmotionHueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style entry insertion.
    pub fn with_hue(mut self, emotion: impl Into<String>, hue: f64) -> Self {
        self.insert(emotion, hue);
        self
    }

    pub fn insert(&mut self, emotion: impl Into<String>, hue: f64) {
        self.hues.insert(emotion.into(), hue);
    }

    /// Hue for an emotion, if present.
    pub fn get(&self, emotion: &str) -> Option<f64> {
        self.hues.get(emotion).copied()
    }

    /// Hue of the neutral state, if present.
    pub fn neutral(&self) -> Option<f64> {
        self.get(NEUTRAL)
    }

    pub fn contains(&self, emotion: &str) -> bool {
        self.hues.contains_key(emotion)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.hues.iter().map(|(name, hue)| (name.as_str(), *hue))
    }

    pub fn len(&self) -> usize {
        self.hues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }
}

/// A labelled hue band, used only for human-readable diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
    /// Display label, e.g. `"Ocean Blue"`.
    pub label: String,
}

impl ColorRange {
    pub fn new(low: f64, high: f64, label: impl Into<String>) -> Self {
        Self {
            low,
            high,
            label: label.into(),
        }
    }

    pub fn contains(&self, hue: f64) -> bool {
        hue >= self.low && hue <= self.high
    }
}

/// Label of the first band containing `hue`.
pub fn color_label(ranges: &[ColorRange], hue: f64) -> Option<&str> {
    ranges
        .iter()
        .find(|range| range.contains(hue))
        .map(|range| range.label.as_str())
}

/// Check that `ranges` tile `[0.0, 1.0]` in order without gaps.
pub fn check_color_ranges(ranges: &[ColorRange]) -> Result<(), String> {
    const EPS: f64 = 1e-9;

    let (Some(first), Some(last)) = (ranges.first(), ranges.last()) else {
        return Err("color ranges are empty".to_string());
    };
    if first.low.abs() > EPS {
        return Err(format!("color ranges start at {} instead of 0", first.low));
    }
    if (last.high - 1.0).abs() > EPS {
        return Err(format!("color ranges end at {} instead of 1", last.high));
    }
    for range in ranges {
        if range.low > range.high {
            return Err(format!(
                "color range {:?} has low {} above high {}",
                range.label, range.low, range.high
            ));
        }
    }
    for pair in ranges.windows(2) {
        if (pair[1].low - pair[0].high).abs() > EPS {
            return Err(format!(
                "gap or overlap between {:?} (ends {}) and {:?} (starts {})",
                pair[0].label, pair[0].high, pair[1].label, pair[1].low
            ));
        }
    }
    Ok(())
}
