//! Emotion scoring from the current parameter snapshot.
//!
//! # Algorithm
//!
//! 1. **Contribute**: for each weight, clamp the parameter to `[0, 1]`.
//!    Positive weights add `v * w`; negative weights add `(1 - v) * |w|`.
//! 2. **Clamp** each emotion's sum to `[0, 1]`.
//! 3. **Normalize** by the total when the total is positive.
//! 4. **Neutral** is the residual `max(0, 1 - sum)`.
//! 5. **Dominant** is the argmax; ties go to the first declared emotion.

use hueshift_expression_model::emotion::{EmotionDefinition, NEUTRAL};

use crate::snapshot::ParameterSnapshot;

/// Per-emotion scores in declaration order, `"neutral"` last.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScores {
    entries: Vec<(String, f64)>,
}

impl EmotionScores {
    /// Score of an emotion, including `"neutral"`.
    pub fn get(&self, emotion: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == emotion)
            .map(|(_, score)| *score)
    }

    pub fn neutral(&self) -> f64 {
        self.get(NEUTRAL).unwrap_or(0.0)
    }

    /// `(emotion, score)` pairs in declaration order, `"neutral"` last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Sum of every score, neutral included.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReport {
    pub scores: EmotionScores,
    pub dominant: String,
    pub dominant_score: f64,
}

/// Scores a snapshot against a fixed, ordered set of emotion definitions.
#[derive(Debug, Clone)]
pub struct EmotionScorer {
    emotions: Vec<EmotionDefinition>,
}

impl EmotionScorer {
    pub fn new(emotions: Vec<EmotionDefinition>) -> Self {
        Self { emotions }
    }

    /// Declared emotions in tie-break order.
    pub fn emotions(&self) -> &[EmotionDefinition] {
        &self.emotions
    }

    pub fn score(&self, snapshot: &ParameterSnapshot) -> EmotionReport {
        score_emotions(snapshot, &self.emotions)
    }
}

/// Contribution of one weighted parameter.
pub fn contribution(value: f64, weight: f64) -> f64 {
    let v = value.clamp(0.0, 1.0);
    if weight > 0.0 {
        v * weight
    } else {
        (1.0 - v) * weight.abs()
    }
}

/// Unclamped weighted sum for one emotion.
pub fn raw_score(emotion: &EmotionDefinition, snapshot: &ParameterSnapshot) -> f64 {
    emotion
        .weights
        .iter()
        .map(|(param, weight)| contribution(snapshot.get(param), *weight))
        .sum()
}

/// Score every emotion and pick the dominant one.
pub fn score_emotions(snapshot: &ParameterSnapshot, emotions: &[EmotionDefinition]) -> EmotionReport {
    let mut entries: Vec<(String, f64)> = emotions
        .iter()
        .map(|emotion| {
            let score = raw_score(emotion, snapshot);
            let clamped = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
            (emotion.name.clone(), clamped)
        })
        .collect();

    let total: f64 = entries.iter().map(|(_, score)| score).sum();
    if total > 0.0 {
        for (_, score) in &mut entries {
            *score /= total;
        }
    }

    let normalized_sum: f64 = entries.iter().map(|(_, score)| score).sum();
    entries.push((NEUTRAL.to_string(), (1.0 - normalized_sum).max(0.0)));

    let mut dominant = 0;
    for (i, (_, score)) in entries.iter().enumerate() {
        if *score > entries[dominant].1 {
            dominant = i;
        }
    }
    let (dominant, dominant_score) = entries[dominant].clone();

    EmotionReport {
        scores: EmotionScores { entries },
        dominant,
        dominant_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn happy() -> EmotionDefinition {
        EmotionDefinition::new("happy")
            .with_weight("mouthSmile", 0.6)
            .with_weight("eyeLidLeft", -0.4)
            .with_weight("eyeLidRight", -0.4)
    }

    fn sad() -> EmotionDefinition {
        EmotionDefinition::new("sad").with_weight("mouthFrown", 1.0)
    }

    #[test]
    fn test_negative_weight_rewards_low_values() {
        assert!((contribution(0.0, -0.4) - 0.4).abs() < 1e-12);
        assert!((contribution(1.0, -0.4)).abs() < 1e-12);
        assert!((contribution(0.5, 0.6) - 0.3).abs() < 1e-12);
        // Values are clamped before weighting
        assert!((contribution(-1.0, 0.5)).abs() < 1e-12);
        assert!((contribution(2.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_happy_raw_score_is_clamped_to_one() {
        let snapshot = ParameterSnapshot::from_values([
            ("mouthSmile", 1.0),
            ("eyeLidLeft", 0.0),
            ("eyeLidRight", 0.0),
        ]);
        assert!((raw_score(&happy(), &snapshot) - 1.4).abs() < 1e-12);

        let report = score_emotions(&snapshot, &[happy()]);
        assert_eq!(report.scores.get("happy"), Some(1.0));
        assert_eq!(report.dominant, "happy");
        assert_eq!(report.scores.neutral(), 0.0);
    }

    #[test]
    fn test_missing_parameters_read_as_zero() {
        // Negative weights still contribute for absent ("relaxed") params
        let snapshot = ParameterSnapshot::default();
        assert!((raw_score(&happy(), &snapshot) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_snapshot_is_neutral() {
        let snapshot = ParameterSnapshot::with_names(["mouthSmile", "mouthFrown"]);
        let defs = [
            EmotionDefinition::new("happy").with_weight("mouthSmile", 1.0),
            sad(),
        ];
        let report = score_emotions(&snapshot, &defs);

        assert_eq!(report.scores.get("happy"), Some(0.0));
        assert_eq!(report.scores.get("sad"), Some(0.0));
        assert_eq!(report.scores.neutral(), 1.0);
        assert_eq!(report.dominant, NEUTRAL);
        assert_eq!(report.dominant_score, 1.0);
    }

    #[test]
    fn test_empty_definitions_yield_pure_neutral() {
        let report = score_emotions(&ParameterSnapshot::default(), &[]);
        assert_eq!(report.scores.len(), 1);
        assert_eq!(report.scores.neutral(), 1.0);
        assert_eq!(report.dominant, NEUTRAL);
    }

    #[test]
    fn test_scores_are_normalized() {
        let snapshot = ParameterSnapshot::from_values([("mouthSmile", 0.3), ("mouthFrown", 0.1)]);
        let defs = [
            EmotionDefinition::new("happy").with_weight("mouthSmile", 1.0),
            sad(),
        ];
        let report = score_emotions(&snapshot, &defs);

        assert!((report.scores.get("happy").unwrap() - 0.75).abs() < 1e-12);
        assert!((report.scores.get("sad").unwrap() - 0.25).abs() < 1e-12);
        assert!(report.scores.neutral() < 1e-12);
        assert!((report.scores.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_go_to_first_declared() {
        let snapshot = ParameterSnapshot::from_values([("mouthSmile", 0.5), ("mouthFrown", 0.5)]);
        let happy = EmotionDefinition::new("happy").with_weight("mouthSmile", 1.0);

        let report = score_emotions(&snapshot, &[happy.clone(), sad()]);
        assert_eq!(report.dominant, "happy");

        let report = score_emotions(&snapshot, &[sad(), happy]);
        assert_eq!(report.dominant, "sad");
    }

    #[test]
    fn test_scores_keep_declaration_order() {
        let report = score_emotions(&ParameterSnapshot::default(), &[sad(), happy()]);
        let names: Vec<&str> = report.scores.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["sad", "happy", NEUTRAL]);
    }
}
