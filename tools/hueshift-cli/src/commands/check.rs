//! Validate config and profile.

use hueshift_common::config::{config_file_path, AppConfig};

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    println!("HueShift Check");
    println!("{}", "=".repeat(50));

    let source = match &config.profile {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    println!("[OK] Config: {}", config_file_path().display());

    let pipeline = match super::build_pipeline(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            println!("[FAIL] Profile ({source}): {e}");
            return Err(e);
        }
    };
    println!("[OK] Profile: {source}");

    let registry = pipeline.resolver().registry();
    println!(
        "     {} parameters, {} aliases, {} polarity rules",
        registry.len(),
        registry.alias_count(),
        pipeline.resolver().polarity_rule_count()
    );

    let smoother = pipeline.smoother();
    println!(
        "[OK] Smoothing: {} over {} samples",
        smoother.method(),
        smoother.capacity()
    );
    println!(
        "[OK] Throttle: {} ms, idle timeout {} ms",
        config.processing.throttle_ms, config.processing.idle_timeout_ms
    );

    let profile = super::load_profile(&config)?;
    println!();
    println!("Emotions:");
    for emotion in &profile.emotions {
        let weights = emotion
            .weights
            .iter()
            .map(|(param, weight)| format!("{param}={weight}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<12} {}", emotion.name, weights);
    }

    println!();
    println!("Hues:");
    for (emotion, hue) in profile.hues.iter() {
        println!(
            "  {:<12} {:.3}  {}",
            emotion,
            hue,
            pipeline.color_label(hue).unwrap_or("?")
        );
    }

    println!();
    println!("Configuration is valid. HueShift is ready.");
    Ok(())
}
