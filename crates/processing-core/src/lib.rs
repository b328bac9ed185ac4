//! HueShift Processing Core: the emotion pipeline
//!
//! Turns a stream of facial-tracking parameter updates into one hue:
//! - **Resolution:** Map drifting tracker names onto canonical parameters
//! - **Scoring:** Weighted emotion scores with a residual neutral
//! - **Blending:** Dominant/secondary hue blend
//! - **Smoothing:** Rolling-history smoothing, selectable by method
//! - **Gating:** Minimum interval between emissions
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod diagnostics;
pub mod gate;
pub mod hue_blend;
pub mod pipeline;
pub mod resolver;
pub mod scoring;
pub mod smoothing;
pub mod snapshot;

pub use diagnostics::PipelineDiagnostics;
pub use gate::{should_emit, UpdateGate};
pub use hue_blend::{blend_hue, HueBlender};
pub use pipeline::{EmotionPipeline, HueEmission};
pub use resolver::{MatchStrategy, NameResolver, Resolution};
pub use scoring::{score_emotions, EmotionReport, EmotionScorer, EmotionScores};
pub use smoothing::{SmoothingMethod, Smoother};
pub use snapshot::ParameterSnapshot;
