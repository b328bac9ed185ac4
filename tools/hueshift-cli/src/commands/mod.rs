pub mod check;
pub mod init_config;
pub mod listen;
pub mod replay;
pub mod resolve;

use clap::Args;

use hueshift_common::config::{AppConfig, ProcessingConfig};
use hueshift_expression_model::profile::ExpressionProfile;
use hueshift_processing_core::EmotionPipeline;

/// Per-run overrides for the processing section of the config.
#[derive(Args, Debug, Default)]
pub struct ProcessingArgs {
    /// Minimum milliseconds between emissions
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// Smoothing method: simple_average|weighted_average|exponential_smoothing
    #[arg(long)]
    pub smoothing: Option<String>,

    /// Smoothing window size
    #[arg(long)]
    pub window: Option<usize>,
}

impl ProcessingArgs {
    pub fn apply(&self, config: &mut ProcessingConfig) {
        if let Some(throttle_ms) = self.throttle_ms {
            config.throttle_ms = throttle_ms;
        }
        if let Some(smoothing) = &self.smoothing {
            config.smoothing_method = smoothing.clone();
        }
        if let Some(window) = self.window {
            config.smoothing_window_size = window;
        }
    }
}

/// The configured profile, or the built-in catalog.
pub fn load_profile(config: &AppConfig) -> anyhow::Result<ExpressionProfile> {
    match &config.profile {
        Some(path) => {
            let profile = ExpressionProfile::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load profile: {e}"))?;
            tracing::info!(path = %path.display(), "Loaded expression profile");
            Ok(profile)
        }
        None => Ok(ExpressionProfile::default()),
    }
}

/// Build the pipeline. Configuration errors stop the command here.
pub fn build_pipeline(config: &AppConfig) -> anyhow::Result<EmotionPipeline> {
    let profile = load_profile(config)?;
    EmotionPipeline::new(&config.processing, &profile)
        .map_err(|e| anyhow::anyhow!("Pipeline refused to start: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_touch_given_fields() {
        let mut config = ProcessingConfig::default();
        ProcessingArgs {
            throttle_ms: Some(250),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.throttle_ms, 250);
        assert_eq!(config.smoothing_method, "simple_average");
        assert_eq!(config.smoothing_window_size, 10);
    }

    #[test]
    fn test_bad_smoothing_override_fails_to_build() {
        let mut config = AppConfig::default();
        ProcessingArgs {
            smoothing: Some("median".into()),
            ..Default::default()
        }
        .apply(&mut config.processing);

        let err = build_pipeline(&config).unwrap_err();
        assert!(err.to_string().contains("median"));
    }
}
