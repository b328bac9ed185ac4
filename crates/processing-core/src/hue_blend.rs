//! Dominant/secondary hue blending.
//!
//! The dominant emotion is weighted by `score^3` and the runner-up by
//! `(1 - score)^2`, so a clearly dominant emotion pulls the hue almost
//! entirely toward its own value. A lone active emotion blends with itself.

use hueshift_expression_model::emotion::{EmotionHueTable, NEUTRAL};

use crate::scoring::EmotionScores;

/// Blend emotion scores into one hue in `[0, 1]`.
pub fn blend_hue(scores: &EmotionScores, hues: &EmotionHueTable) -> f64 {
    let neutral_hue = hues.neutral().unwrap_or(0.0);

    let mut active: Vec<(&str, f64)> = scores
        .iter()
        .filter(|(name, score)| *name != NEUTRAL && *score > 0.0)
        .collect();
    if active.is_empty() {
        return neutral_hue.clamp(0.0, 1.0);
    }

    // Stable sort keeps declaration order among equal scores
    active.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (primary, primary_score) = active[0];
    let (secondary, _) = active.get(1).copied().unwrap_or(active[0]);

    let hue_of = |emotion: &str| hues.get(emotion).unwrap_or(neutral_hue);
    let primary_weight = primary_score.powi(3);
    let secondary_weight = (1.0 - primary_score).powi(2);

    let hue = (hue_of(primary) * primary_weight + hue_of(secondary) * secondary_weight)
        / (primary_weight + secondary_weight);
    hue.clamp(0.0, 1.0)
}

/// Hue blender bound to one hue table.
#[derive(Debug, Clone)]
pub struct HueBlender {
    hues: EmotionHueTable,
}

impl HueBlender {
    pub fn new(hues: EmotionHueTable) -> Self {
        Self { hues }
    }

    pub fn hues(&self) -> &EmotionHueTable {
        &self.hues
    }

    pub fn blend(&self, scores: &EmotionScores) -> f64 {
        blend_hue(scores, &self.hues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_emotions;
    use crate::snapshot::ParameterSnapshot;
    use hueshift_expression_model::emotion::EmotionDefinition;

    fn hues() -> EmotionHueTable {
        EmotionHueTable::new()
            .with_hue("happy", 0.2)
            .with_hue("sad", 0.6)
            .with_hue(NEUTRAL, 0.02)
    }

    fn defs() -> Vec<EmotionDefinition> {
        vec![
            EmotionDefinition::new("happy").with_weight("mouthSmile", 1.0),
            EmotionDefinition::new("sad").with_weight("mouthFrown", 1.0),
        ]
    }

    fn scores(smile: f64, frown: f64) -> EmotionScores {
        let snapshot = ParameterSnapshot::from_values([("mouthSmile", smile), ("mouthFrown", frown)]);
        score_emotions(&snapshot, &defs()).scores
    }

    #[test]
    fn test_no_active_emotion_returns_neutral_hue() {
        assert_eq!(blend_hue(&scores(0.0, 0.0), &hues()), 0.02);
    }

    #[test]
    fn test_single_emotion_blends_with_itself() {
        let hue = blend_hue(&scores(0.7, 0.0), &hues());
        assert!((hue - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_two_emotions_weighted_by_dominance() {
        // Normalized: happy 0.75, sad 0.25
        let hue = blend_hue(&scores(0.3, 0.1), &hues());
        let pw = 0.75_f64.powi(3);
        let sw = 0.25_f64.powi(2);
        let expected = (0.2 * pw + 0.6 * sw) / (pw + sw);
        assert!((hue - expected).abs() < 1e-12);
        // Pulled toward the dominant hue
        assert!((hue - 0.2).abs() < (hue - 0.6).abs());
    }

    #[test]
    fn test_equal_scores_prefer_first_declared() {
        // Both 0.5: weights 0.125 and 0.25, so the secondary pulls harder
        let hue = blend_hue(&scores(0.5, 0.5), &hues());
        let expected = (0.2 * 0.125 + 0.6 * 0.25) / 0.375;
        assert!((hue - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_hue_falls_back_to_neutral() {
        let table = EmotionHueTable::new().with_hue(NEUTRAL, 0.4);
        let hue = HueBlender::new(table).blend(&scores(0.9, 0.0));
        assert!((hue - 0.4).abs() < 1e-12);
    }
}
