//! Replay a recorded JSONL session.

use std::io::Write;
use std::path::PathBuf;

use hueshift_common::config::AppConfig;
use hueshift_expression_model::event::parse_events;
use hueshift_stream::EmissionWriter;

pub fn run(config: AppConfig, events: PathBuf, emissions: Option<PathBuf>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&events)
        .map_err(|_| anyhow::anyhow!("Events file not found: {}", events.display()))?;
    let events =
        parse_events(&content).map_err(|e| anyhow::anyhow!("Failed to parse events: {e}"))?;

    let mut pipeline = super::build_pipeline(&config)?;
    let parameter = &config.output.parameter;
    let mut writer: EmissionWriter<Box<dyn Write + Send>> = match &emissions {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            EmissionWriter::new(Box::new(std::fs::File::create(path)?), parameter.as_str())
        }
        None => EmissionWriter::new(Box::new(std::io::stdout()), parameter.as_str()),
    };

    // Events without a timestamp reuse the previous one
    let mut now_ms = 0;
    for event in &events {
        now_ms = event.timestamp_ms.unwrap_or(now_ms);
        if let Some(emission) = pipeline.process(event, now_ms) {
            writer.write_emission(&emission)?;
        }
    }
    writer.flush()?;

    let diag = pipeline.diagnostics();
    let mut report = Vec::new();
    report.push(format!("Replayed {} events", diag.total_events));
    report.push(format!(
        "  Recognized: {} ({:.1}%)",
        diag.recognized_events,
        diag.recognition_rate() * 100.0
    ));
    report.push(format!("  Unrecognized: {}", diag.unrecognized_events));
    for (name, count) in diag.top_unrecognized(10) {
        report.push(format!("    {name}: {count}"));
    }
    report.push(format!("  Malformed values: {}", diag.malformed_values));
    report.push(format!("  Emissions: {}", diag.emissions));
    if let Some(path) = &emissions {
        report.push(format!("  Written to: {}", path.display()));
    }

    // Keep stdout clean for emissions
    let report = report.join("\n");
    if emissions.is_some() {
        println!("{report}");
    } else {
        eprintln!("{report}");
    }
    Ok(())
}
