//! The per-event pipeline: resolve → snapshot → [gate] → score → blend →
//! smooth.
//!
//! Every event updates the snapshot. Scoring, blending and smoothing only
//! run when the gate is open, so the smoother history advances once per
//! emission rather than once per event.

use serde::Serialize;

use hueshift_common::config::ProcessingConfig;
use hueshift_common::error::{HueshiftError, HueshiftResult};
use hueshift_expression_model::emotion::{color_label, ColorRange};
use hueshift_expression_model::event::ParameterEvent;
use hueshift_expression_model::profile::ExpressionProfile;

use crate::diagnostics::PipelineDiagnostics;
use crate::gate::UpdateGate;
use crate::hue_blend::HueBlender;
use crate::resolver::{NameResolver, Resolution};
use crate::scoring::{EmotionReport, EmotionScorer};
use crate::smoothing::Smoother;
use crate::snapshot::ParameterSnapshot;

/// One outbound update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HueEmission {
    pub timestamp_ms: u64,
    /// Smoothed hue in `[0, 1]`; the scalar handed to the sender.
    pub hue: f64,
    /// Blended hue before smoothing.
    pub raw_hue: f64,
    pub dominant: String,
    pub dominant_score: f64,
}

/// Single-consumer emotion pipeline.
#[derive(Debug)]
pub struct EmotionPipeline {
    resolver: NameResolver,
    snapshot: ParameterSnapshot,
    scorer: EmotionScorer,
    blender: HueBlender,
    smoother: Smoother,
    gate: UpdateGate,
    color_ranges: Vec<ColorRange>,
    diagnostics: PipelineDiagnostics,
    last_report: Option<EmotionReport>,
}

impl EmotionPipeline {
    /// Build a pipeline. Any profile or config problem is a configuration
    /// error and the pipeline is not created.
    pub fn new(config: &ProcessingConfig, profile: &ExpressionProfile) -> HueshiftResult<Self> {
        let smoother = Smoother::from_config(config)?;

        let registry = profile
            .build_registry()
            .map_err(|e| HueshiftError::config(e.to_string()))?;
        let warnings = profile
            .validate(&registry)
            .map_err(|e| HueshiftError::config(e.to_string()))?;
        for (emotion, parameter) in &warnings.unknown_weight_parameters {
            tracing::warn!(
                emotion = %emotion,
                parameter = %parameter,
                "Emotion weight references an unregistered parameter; it will read 0"
            );
        }

        let snapshot = ParameterSnapshot::from_registry(&registry);
        let resolver = NameResolver::new(registry, profile.polarity.iter().cloned());

        tracing::info!(
            parameters = resolver.registry().len(),
            aliases = resolver.registry().alias_count(),
            polarity_rules = resolver.polarity_rule_count(),
            emotions = profile.emotions.len(),
            smoothing = %smoother.method(),
            window = smoother.capacity(),
            throttle_ms = config.throttle_ms,
            "Emotion pipeline ready"
        );

        Ok(Self {
            resolver,
            snapshot,
            scorer: EmotionScorer::new(profile.emotions.clone()),
            blender: HueBlender::new(profile.hues.clone()),
            smoother,
            gate: UpdateGate::new(config.throttle_ms),
            color_ranges: profile.color_ranges.clone(),
            diagnostics: PipelineDiagnostics::default(),
            last_report: None,
        })
    }

    /// Pipeline over the built-in catalog and default processing config.
    pub fn with_defaults() -> HueshiftResult<Self> {
        Self::new(&ProcessingConfig::default(), &ExpressionProfile::default())
    }

    /// Apply one event to the snapshot. Returns whether the name resolved.
    pub fn ingest(&mut self, event: &ParameterEvent) -> bool {
        self.diagnostics.total_events += 1;

        let value = match event.checked_value() {
            Ok(value) => value,
            Err(reason) => {
                self.diagnostics.malformed_values += 1;
                tracing::warn!(name = %event.name, %reason, "Malformed parameter value, using 0");
                0.0
            }
        };

        let resolution = self.resolver.resolve(&event.name, value, &mut self.snapshot);
        match resolution {
            Resolution::Unmatched => {
                let raw = event.parameter_name();
                if self.diagnostics.record_unrecognized(raw) {
                    tracing::debug!(name = %raw, "Unrecognized parameter");
                }
                false
            }
            resolution => {
                tracing::trace!(
                    name = %event.name,
                    strategy = ?resolution.strategy(),
                    value,
                    "Parameter resolved"
                );
                self.diagnostics.recognized_events += 1;
                true
            }
        }
    }

    /// Ingest an event and emit if the gate allows it at `now_ms`.
    pub fn process(&mut self, event: &ParameterEvent, now_ms: u64) -> Option<HueEmission> {
        self.ingest(event);
        if self.gate.is_open(now_ms) {
            Some(self.evaluate(now_ms))
        } else {
            None
        }
    }

    /// Score, blend and smooth the current snapshot, recording an emission
    /// at `now_ms` regardless of the gate.
    pub fn evaluate(&mut self, now_ms: u64) -> HueEmission {
        let report = self.scorer.score(&self.snapshot);
        let raw_hue = self.blender.blend(&report.scores);
        let hue = self.smoother.smooth(raw_hue);

        self.gate.record_emit(now_ms);
        self.diagnostics.emissions += 1;

        let emission = HueEmission {
            timestamp_ms: now_ms,
            hue,
            raw_hue,
            dominant: report.dominant.clone(),
            dominant_score: report.dominant_score,
        };
        tracing::debug!(
            t = now_ms,
            hue,
            raw_hue,
            dominant = %emission.dominant,
            score = emission.dominant_score,
            color = self.color_label(hue).unwrap_or("?"),
            "Hue emitted"
        );
        self.last_report = Some(report);
        emission
    }

    /// Account an idle period with no inbound events.
    pub fn note_idle(&mut self) {
        self.diagnostics.idle_timeouts += 1;
    }

    /// Diagnostic color band for a hue.
    pub fn color_label(&self, hue: f64) -> Option<&str> {
        color_label(&self.color_ranges, hue)
    }

    pub fn snapshot(&self) -> &ParameterSnapshot {
        &self.snapshot
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn smoother(&self) -> &Smoother {
        &self.smoother
    }

    pub fn gate(&self) -> &UpdateGate {
        &self.gate
    }

    pub fn diagnostics(&self) -> &PipelineDiagnostics {
        &self.diagnostics
    }

    /// Scores from the most recent emission.
    pub fn last_report(&self) -> Option<&EmotionReport> {
        self.last_report.as_ref()
    }
}
