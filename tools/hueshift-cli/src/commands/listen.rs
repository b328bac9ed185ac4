//! Stream events from stdin through the pipeline.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use tokio::io::BufReader;

use hueshift_common::config::AppConfig;
use hueshift_processing_core::EmotionPipeline;
use hueshift_stream::{
    event_queue, spawn_line_reader, EmissionWriter, EventQueue, HueSink, LogSink, RunSummary,
    StreamRunner,
};

pub async fn run(
    config: AppConfig,
    emissions: Option<PathBuf>,
    log_only: bool,
    event_time: bool,
) -> anyhow::Result<()> {
    let pipeline = super::build_pipeline(&config)?;

    let (sender, queue) = event_queue(config.processing.queue_capacity);
    let reader = spawn_line_reader(BufReader::new(tokio::io::stdin()), sender);

    let summary = if log_only {
        drive(pipeline, queue, LogSink::new(), &config, event_time).await
    } else if let Some(path) = emissions {
        let writer = EmissionWriter::create(&path, &config.output.parameter)?;
        tracing::info!(path = %path.display(), "Writing emissions");
        drive(pipeline, queue, writer, &config, event_time).await
    } else {
        let writer = EmissionWriter::new(std::io::stdout(), &config.output.parameter);
        drive(pipeline, queue, writer, &config, event_time).await
    };

    if reader.is_finished() {
        match reader.await {
            Ok(Ok(stats)) => tracing::debug!(
                forwarded = stats.forwarded,
                skipped = stats.skipped,
                "Input closed"
            ),
            Ok(Err(e)) => tracing::warn!(error = %e, "Input reader failed"),
            Err(e) => tracing::warn!(error = %e, "Input reader task failed"),
        }
    } else {
        reader.abort();
    }

    if summary.sink_errors > 0 {
        tracing::warn!(errors = summary.sink_errors, "Some emissions were not delivered");
    }
    Ok(())
}

async fn drive<S: HueSink>(
    pipeline: EmotionPipeline,
    queue: EventQueue,
    sink: S,
    config: &AppConfig,
    event_time: bool,
) -> RunSummary {
    let mut runner =
        StreamRunner::new(pipeline, queue, sink, &config.processing).use_event_time(event_time);

    let stop = runner.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping");
            stop.store(true, Ordering::SeqCst);
        }
    });

    runner.run().await
}
