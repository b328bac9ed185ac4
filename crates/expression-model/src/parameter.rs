//! Canonical tracking parameters and alias resolution tables.
//!
//! Tracking software renames its outputs between versions
//! (`EyeLidLeft`, `LeftEyeOpenness`, `LeftEyeWiden` all mean the same
//! thing). The registry maps every known surface form onto one canonical
//! name. It is built once and is immutable afterwards.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::profile::ProfileError;

/// A canonical parameter and the surface forms that map to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Internal name every alias normalizes to.
    pub canonical_name: String,

    /// Case-sensitive external names. The canonical name is always
    /// implied and does not need to be listed.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ParameterDescriptor {
    /// Create a descriptor from a canonical name and its aliases.
    pub fn new<I, S>(canonical_name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical_name: canonical_name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Every name this descriptor answers to, canonical first.
    /// Repeats within the descriptor are yielded only once.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::new();
        std::iter::once(self.canonical_name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(move |name| seen.insert(*name))
    }
}

/// A signed tracking axis that the registry models as two unsigned
/// parameters.
///
/// `BrowExpressionLeft = 0.6` raises the left brow; `-0.6` lowers it.
/// The positive part is written to `positive`, the negated negative part
/// to `negative`, and the other side is reset to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarityRule {
    /// Incoming name carrying the signed value.
    pub source: String,
    /// Canonical parameter receiving `max(value, 0)`.
    pub positive: String,
    /// Canonical parameter receiving `max(-value, 0)`.
    pub negative: String,
}

impl PolarityRule {
    pub fn new(
        source: impl Into<String>,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    /// Split a signed value into `(positive_part, negative_part)`.
    pub fn split(value: f64) -> (f64, f64) {
        (value.max(0.0), (-value).max(0.0))
    }
}

/// Canonical parameter table with a precomputed alias index.
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    descriptors: Vec<ParameterDescriptor>,
    /// Exact surface form -> descriptor index.
    alias_index: HashMap<String, usize>,
    /// Lower-cased surface form -> descriptor index. First registration
    /// wins when two descriptors fold to the same string.
    folded_index: HashMap<String, usize>,
}

impl ParameterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, failing on the first alias clash.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ParameterDescriptor>,
    ) -> Result<Self, ProfileError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor.
    ///
    /// Fails with [`ProfileError::DuplicateAlias`] if any of its surface
    /// forms already belongs to another descriptor. On failure the
    /// registry is left unchanged.
    pub fn register(&mut self, descriptor: ParameterDescriptor) -> Result<(), ProfileError> {
        for name in descriptor.surface_forms() {
            if let Some(&existing) = self.alias_index.get(name) {
                return Err(ProfileError::DuplicateAlias {
                    alias: name.to_string(),
                    existing: self.descriptors[existing].canonical_name.clone(),
                    incoming: descriptor.canonical_name.clone(),
                });
            }
        }

        let index = self.descriptors.len();
        for name in descriptor.surface_forms() {
            self.alias_index.insert(name.to_string(), index);
            self.folded_index.entry(name.to_lowercase()).or_insert(index);
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Exact, case-sensitive lookup of a surface form.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.alias_index
            .get(name)
            .map(|&i| self.descriptors[i].canonical_name.as_str())
    }

    /// Case-insensitive lookup of a surface form.
    pub fn lookup_case_insensitive(&self, name: &str) -> Option<&str> {
        self.folded_index
            .get(&name.to_lowercase())
            .map(|&i| self.descriptors[i].canonical_name.as_str())
    }

    /// Whether `name` is a canonical parameter name.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.lookup(name) == Some(name)
    }

    /// Canonical names in registration order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.canonical_name.as_str())
    }

    /// Registered descriptors in registration order.
    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    /// Number of canonical parameters.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of distinct surface forms, canonical names included.
    pub fn alias_count(&self) -> usize {
        self.alias_index.len()
    }
}
