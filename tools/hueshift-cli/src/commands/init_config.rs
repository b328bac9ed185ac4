//! Write the default config (and optionally the built-in profile).

use std::path::PathBuf;

use hueshift_common::config::{config_file_path, AppConfig};
use hueshift_expression_model::profile::ExpressionProfile;

pub fn run(output: Option<PathBuf>, profile_output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut config = AppConfig::default();

    if let Some(profile_path) = &profile_output {
        if profile_path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                profile_path.display()
            );
        }
        ExpressionProfile::default()
            .save(profile_path)
            .map_err(|e| anyhow::anyhow!("Failed to write profile: {e}"))?;
        config.profile = Some(profile_path.clone());
        println!("Profile written to {}", profile_path.display());
    }

    config.save_to(&path)?;
    println!("Config written to {}", path.display());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
