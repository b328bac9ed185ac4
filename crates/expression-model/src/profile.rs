//! Expression profile: the seed data the pipeline is constructed from.
//!
//! A profile bundles the parameter registry seed, polarity fallbacks,
//! emotion definitions, hue table, and diagnostic color bands. It can be
//! loaded from a JSON file; [`ExpressionProfile::default`] is the built-in
//! catalog.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::emotion::{check_color_ranges, ColorRange, EmotionDefinition, EmotionHueTable, NEUTRAL};
use crate::parameter::{ParameterDescriptor, ParameterRegistry, PolarityRule};

/// Seed data for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionProfile {
    /// Canonical parameters and their aliases.
    pub parameters: Vec<ParameterDescriptor>,

    /// Signed-axis fallbacks, consulted after exact alias matching.
    #[serde(default)]
    pub polarity: Vec<PolarityRule>,

    /// Emotion definitions in tie-break order.
    pub emotions: Vec<EmotionDefinition>,

    /// Emotion -> hue, including `"neutral"`.
    pub hues: EmotionHueTable,

    /// Diagnostic color bands.
    #[serde(default = "catalog::default_color_ranges")]
    pub color_ranges: Vec<ColorRange>,
}

impl Default for ExpressionProfile {
    fn default() -> Self {
        Self {
            parameters: catalog::default_parameters(),
            polarity: catalog::default_polarity(),
            emotions: catalog::default_emotions(),
            hues: catalog::default_hues(),
            color_ranges: catalog::default_color_ranges(),
        }
    }
}

/// Non-fatal findings from profile validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileWarnings {
    /// `(emotion, parameter)` pairs whose parameter is not registered.
    /// These weights always read zero.
    pub unknown_weight_parameters: Vec<(String, String)>,
}

impl ExpressionProfile {
    /// Load a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| ProfileError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ProfileError::ParseError { path, source: e })
    }

    /// Save the profile as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProfileError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProfileError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ProfileError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| ProfileError::IoError { path, source: e })
    }

    /// Build the alias registry from the parameter seed.
    pub fn build_registry(&self) -> Result<ParameterRegistry, ProfileError> {
        ParameterRegistry::from_descriptors(self.parameters.iter().cloned())
    }

    /// Check every construction-time invariant against a registry built
    /// from this profile.
    pub fn validate(&self, registry: &ParameterRegistry) -> Result<ProfileWarnings, ProfileError> {
        let mut warnings = ProfileWarnings::default();
        let mut seen = HashSet::new();

        for emotion in &self.emotions {
            if emotion.name == NEUTRAL {
                return Err(invalid("\"neutral\" is computed and cannot be declared"));
            }
            if !seen.insert(emotion.name.as_str()) {
                return Err(invalid(format!("emotion {:?} is declared twice", emotion.name)));
            }
            for (param, weight) in &emotion.weights {
                if param == NEUTRAL {
                    return Err(invalid(format!(
                        "emotion {:?} declares a weight for \"neutral\"",
                        emotion.name
                    )));
                }
                if !weight.is_finite() {
                    return Err(invalid(format!(
                        "emotion {:?} has a non-finite weight for {param:?}",
                        emotion.name
                    )));
                }
                if !registry.is_canonical(param) {
                    warnings
                        .unknown_weight_parameters
                        .push((emotion.name.clone(), param.clone()));
                }
            }
            if !self.hues.contains(&emotion.name) {
                return Err(invalid(format!("hue table has no entry for {:?}", emotion.name)));
            }
        }

        if !self.hues.contains(NEUTRAL) {
            return Err(invalid("hue table has no entry for \"neutral\""));
        }
        for (emotion, hue) in self.hues.iter() {
            if !(0.0..=1.0).contains(&hue) {
                return Err(invalid(format!("hue {hue} for {emotion:?} is outside [0, 1]")));
            }
        }

        for rule in &self.polarity {
            if let Some(canonical) = registry.lookup(&rule.source) {
                return Err(invalid(format!(
                    "polarity source {:?} is already an alias of {canonical:?}",
                    rule.source
                )));
            }
            for target in [&rule.positive, &rule.negative] {
                if !registry.is_canonical(target) {
                    return Err(invalid(format!(
                        "polarity rule {:?} targets unknown parameter {target:?}",
                        rule.source
                    )));
                }
            }
        }

        check_color_ranges(&self.color_ranges).map_err(invalid)?;

        Ok(warnings)
    }
}

fn invalid(message: impl Into<String>) -> ProfileError {
    ProfileError::ValidationError {
        message: message.into(),
    }
}

/// Errors that can occur when loading or validating a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Alias {alias:?} of {incoming:?} is already registered to {existing:?}")]
    DuplicateAlias {
        alias: String,
        existing: String,
        incoming: String,
    },

    #[error("Invalid profile: {message}")]
    ValidationError { message: String },
}
