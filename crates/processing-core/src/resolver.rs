//! Incoming name -> canonical parameter resolution.
//!
//! Strategies are tried in a fixed order and the first success wins:
//!
//! 1. **Exact** alias match (case-sensitive, O(1)).
//! 2. **Polarity** fallback: a signed axis split across two parameters.
//! 3. **Case-insensitive** alias match.
//!
//! Substring matching is deliberately absent: short names such as `Left`
//! would match dozens of unrelated parameters.

use std::collections::HashMap;

use hueshift_expression_model::event::parameter_name;
use hueshift_expression_model::parameter::{ParameterRegistry, PolarityRule};

use crate::snapshot::ParameterSnapshot;

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Polarity,
    CaseInsensitive,
}

/// Outcome of resolving one `(name, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'r> {
    /// The name is a known alias.
    Exact { canonical: &'r str, value: f64 },

    /// The name is a signed axis routed to two parameters.
    Polarity {
        rule: &'r PolarityRule,
        positive: f64,
        negative: f64,
    },

    /// The name matched an alias after case folding.
    CaseInsensitive { canonical: &'r str, value: f64 },

    /// Nothing matched. The snapshot is untouched.
    Unmatched,
}

impl<'r> Resolution<'r> {
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }

    pub fn strategy(&self) -> Option<MatchStrategy> {
        match self {
            Self::Exact { .. } => Some(MatchStrategy::Exact),
            Self::Polarity { .. } => Some(MatchStrategy::Polarity),
            Self::CaseInsensitive { .. } => Some(MatchStrategy::CaseInsensitive),
            Self::Unmatched => None,
        }
    }

    /// `(canonical, value)` writes this resolution applies, in order.
    pub fn writes(&self) -> Vec<(&'r str, f64)> {
        match self {
            Self::Exact { canonical, value } | Self::CaseInsensitive { canonical, value } => {
                vec![(*canonical, *value)]
            }
            Self::Polarity {
                rule,
                positive,
                negative,
            } => {
                let rule: &'r PolarityRule = *rule;
                vec![
                    (rule.positive.as_str(), *positive),
                    (rule.negative.as_str(), *negative),
                ]
            }
            Self::Unmatched => vec![],
        }
    }
}

/// Resolves raw tracker names against a closed registry.
#[derive(Debug, Clone)]
pub struct NameResolver {
    registry: ParameterRegistry,
    polarity: HashMap<String, PolarityRule>,
}

impl NameResolver {
    /// Create a resolver. When two rules share a source the first wins.
    pub fn new(registry: ParameterRegistry, rules: impl IntoIterator<Item = PolarityRule>) -> Self {
        let mut polarity = HashMap::new();
        for rule in rules {
            polarity.entry(rule.source.clone()).or_insert(rule);
        }
        Self { registry, polarity }
    }

    /// The registry this resolver matches against.
    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// Number of polarity rules.
    pub fn polarity_rule_count(&self) -> usize {
        self.polarity.len()
    }

    /// Match a raw name without touching any snapshot.
    ///
    /// Address prefixes are ignored: `/avatar/parameters/EyeLidLeft`
    /// resolves like `EyeLidLeft`.
    pub fn match_name(&self, raw_name: &str, value: f64) -> Resolution<'_> {
        let name = parameter_name(raw_name);

        if let Some(canonical) = self.registry.lookup(name) {
            return Resolution::Exact { canonical, value };
        }

        if let Some(rule) = self.polarity.get(name) {
            let (positive, negative) = PolarityRule::split(value);
            return Resolution::Polarity {
                rule,
                positive,
                negative,
            };
        }

        if let Some(canonical) = self.registry.lookup_case_insensitive(name) {
            return Resolution::CaseInsensitive { canonical, value };
        }

        Resolution::Unmatched
    }

    /// Match a raw name and apply the result to `snapshot`.
    pub fn resolve(
        &self,
        raw_name: &str,
        value: f64,
        snapshot: &mut ParameterSnapshot,
    ) -> Resolution<'_> {
        let resolution = self.match_name(raw_name, value);
        for (canonical, applied) in resolution.writes() {
            snapshot.set(canonical, applied);
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_expression_model::parameter::ParameterDescriptor;

    fn resolver() -> NameResolver {
        let registry = ParameterRegistry::from_descriptors([
            ParameterDescriptor::new("eyeBlinkLeft", ["EyeBlinkLeft", "LeftEyeBlink"]),
            ParameterDescriptor::new("browUpLeft", ["BrowUpLeft"]),
            ParameterDescriptor::new("browDownLeft", ["BrowDownLeft"]),
        ])
        .unwrap();
        NameResolver::new(
            registry,
            [PolarityRule::new(
                "BrowExpressionLeft",
                "browUpLeft",
                "browDownLeft",
            )],
        )
    }

    #[test]
    fn test_exact_alias_resolves_and_applies() {
        let resolver = resolver();
        let mut snapshot = ParameterSnapshot::from_registry(resolver.registry());

        let resolution = resolver.resolve("LeftEyeBlink", 0.9, &mut snapshot);
        assert_eq!(
            resolution,
            Resolution::Exact {
                canonical: "eyeBlinkLeft",
                value: 0.9
            }
        );
        assert_eq!(snapshot.get("eyeBlinkLeft"), 0.9);
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let resolver = resolver();
        let mut snapshot = ParameterSnapshot::from_registry(resolver.registry());

        let resolution = resolver.resolve("leftEYEBLINK", 0.4, &mut snapshot);
        assert_eq!(resolution.strategy(), Some(MatchStrategy::CaseInsensitive));
        assert_eq!(snapshot.get("eyeBlinkLeft"), 0.4);
    }

    #[test]
    fn test_polarity_routes_both_sides() {
        let resolver = resolver();
        let mut snapshot = ParameterSnapshot::from_registry(resolver.registry());

        resolver.resolve("BrowExpressionLeft", -0.6, &mut snapshot);
        assert_eq!(snapshot.get("browUpLeft"), 0.0);
        assert!((snapshot.get("browDownLeft") - 0.6).abs() < 1e-12);

        // Swinging positive clears the opposite side
        resolver.resolve("BrowExpressionLeft", 0.3, &mut snapshot);
        assert!((snapshot.get("browUpLeft") - 0.3).abs() < 1e-12);
        assert_eq!(snapshot.get("browDownLeft"), 0.0);
    }

    #[test]
    fn test_exact_match_wins_over_case_insensitive() {
        let registry = ParameterRegistry::from_descriptors([
            ParameterDescriptor::new("eyeX", ["EyeX"]),
            ParameterDescriptor::new("legacyEyeX", ["EYEX"]),
        ])
        .unwrap();
        let resolver = NameResolver::new(registry, Vec::<PolarityRule>::new());
        assert_eq!(
            resolver.match_name("EYEX", 0.1),
            Resolution::Exact {
                canonical: "legacyEyeX",
                value: 0.1
            }
        );
    }

    #[test]
    fn test_address_prefix_is_stripped() {
        let resolver = resolver();
        let resolution = resolver.match_name("/avatar/parameters/v2/EyeBlinkLeft", 1.0);
        assert_eq!(resolution.strategy(), Some(MatchStrategy::Exact));
    }

    #[test]
    fn test_no_substring_matching() {
        let resolver = resolver();
        let mut snapshot = ParameterSnapshot::from_registry(resolver.registry());

        let resolution = resolver.resolve("Left", 1.0, &mut snapshot);
        assert_eq!(resolution, Resolution::Unmatched);
        assert!(snapshot.iter().all(|(_, v)| v == 0.0));
    }
}
