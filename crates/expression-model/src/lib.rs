//! HueShift Expression Model
//!
//! Defines the core data contracts for the HueShift pipeline:
//! - **Parameters:** Canonical facial-tracking parameters, their aliases,
//!   and signed polarity fallbacks
//! - **Emotions:** Weighted emotion definitions, the hue table, and
//!   diagnostic color bands
//! - **Profile:** The seed data bundle the pipeline is built from, with
//!   a built-in default catalog
//! - **Events:** Inbound `(name, value)` parameter updates
//!
//! Tracking values are expected in `[0.0, 1.0]` or `[-1.0, 1.0]`.

pub mod catalog;
pub mod emotion;
pub mod event;
pub mod parameter;
pub mod profile;

pub use emotion::*;
pub use event::*;
pub use parameter::*;
pub use profile::*;
