//! Show how parameter names resolve.

use hueshift_common::config::AppConfig;
use hueshift_processing_core::{MatchStrategy, Resolution};

pub fn run(config: AppConfig, names: Vec<String>) -> anyhow::Result<()> {
    let pipeline = super::build_pipeline(&config)?;
    let resolver = pipeline.resolver();

    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for name in &names {
        let resolution = resolver.match_name(name, 1.0);
        let target = match &resolution {
            Resolution::Exact { canonical, .. } | Resolution::CaseInsensitive { canonical, .. } => {
                canonical.to_string()
            }
            Resolution::Polarity { rule, .. } => {
                format!("+{} / -{}", rule.positive, rule.negative)
            }
            Resolution::Unmatched => "-".to_string(),
        };
        let strategy = match resolution.strategy() {
            Some(MatchStrategy::Exact) => "exact",
            Some(MatchStrategy::Polarity) => "polarity",
            Some(MatchStrategy::CaseInsensitive) => "case-insensitive",
            None => "unmatched",
        };
        println!("{name:<width$}  {strategy:<16}  {target}");
    }

    Ok(())
}
