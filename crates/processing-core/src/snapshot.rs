//! Current value of every canonical parameter.

use std::collections::HashMap;

use hueshift_expression_model::parameter::ParameterRegistry;

/// Canonical name -> latest value.
///
/// Every registered parameter starts at `0.0`. Entries are overwritten,
/// never removed. Iteration follows registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSnapshot {
    names: Vec<String>,
    values: Vec<f64>,
    index: HashMap<String, usize>,
}

impl ParameterSnapshot {
    /// Zero-initialised snapshot covering every parameter in the registry.
    pub fn from_registry(registry: &ParameterRegistry) -> Self {
        Self::with_names(registry.canonical_names())
    }

    /// Zero-initialised snapshot over an explicit name list.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut snapshot = Self::default();
        for name in names {
            let name = name.into();
            if snapshot.index.contains_key(&name) {
                continue;
            }
            snapshot.index.insert(name.clone(), snapshot.names.len());
            snapshot.names.push(name);
            snapshot.values.push(0.0);
        }
        snapshot
    }

    /// Snapshot over the given names with the given values.
    pub fn from_values<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let pairs: Vec<(String, f64)> = pairs.into_iter().map(|(n, v)| (n.into(), v)).collect();
        let mut snapshot = Self::with_names(pairs.iter().map(|(n, _)| n.clone()));
        for (name, value) in &pairs {
            snapshot.set(name, *value);
        }
        snapshot
    }

    /// Value of a parameter, `0.0` when unknown.
    pub fn get(&self, name: &str) -> f64 {
        self.value(name).unwrap_or(0.0)
    }

    /// Value of a parameter if it is tracked.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.values[i])
    }

    /// Overwrite a tracked parameter. Returns `false` for unknown names,
    /// which are left out of the snapshot.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Reset every value to zero.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    /// `(name, value)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Parameters whose magnitude exceeds `threshold`.
    pub fn active(&self, threshold: f64) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(move |(_, v)| v.abs() > threshold)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_expression_model::parameter::ParameterDescriptor;

    #[test]
    fn test_snapshot_starts_at_zero() {
        let registry = ParameterRegistry::from_descriptors([
            ParameterDescriptor::new("mouthSmile", ["MouthSmile"]),
            ParameterDescriptor::new("jawOpen", ["JawOpen"]),
        ])
        .unwrap();
        let snapshot = ParameterSnapshot::from_registry(&registry);

        assert_eq!(snapshot.len(), 2);
        let pairs: Vec<(&str, f64)> = snapshot.iter().collect();
        assert_eq!(pairs, vec![("mouthSmile", 0.0), ("jawOpen", 0.0)]);
    }

    #[test]
    fn test_set_only_touches_known_names() {
        let mut snapshot = ParameterSnapshot::with_names(["mouthSmile"]);
        assert!(snapshot.set("mouthSmile", 0.8));
        assert!(!snapshot.set("MouthSmile", 0.3));

        assert_eq!(snapshot.get("mouthSmile"), 0.8);
        assert_eq!(snapshot.value("MouthSmile"), None);
        assert_eq!(snapshot.get("MouthSmile"), 0.0);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_active_and_reset() {
        let mut snapshot = ParameterSnapshot::from_values([("a", 0.5), ("b", 0.0), ("c", -0.2)]);
        let active: Vec<&str> = snapshot.active(0.01).map(|(n, _)| n).collect();
        assert_eq!(active, vec!["a", "c"]);

        snapshot.reset();
        assert_eq!(snapshot.active(0.0).count(), 0);
    }
}
