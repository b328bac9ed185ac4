//! HueShift Stream
//!
//! Drives an [`EmotionPipeline`] from a live event supply:
//!
//! - **Queue:** bounded, thread-safe producer → single consumer
//! - **Reader:** JSONL lines from any async reader (stdin, file)
//! - **Runner:** ordered consumption with a bounded idle wait
//! - **Sinks:** where emitted hues go (JSONL writer, log)
//!
//! The pipeline itself is owned by the runner and never shared.

pub mod queue;
pub mod reader;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use hueshift_common::clock::PipelineClock;
use hueshift_common::config::ProcessingConfig;
use hueshift_common::error::HueshiftResult;
use hueshift_expression_model::event::ParameterEvent;
use hueshift_processing_core::{EmotionPipeline, HueEmission};

pub use queue::{event_queue, EventQueue, EventSender, WaitResult};
pub use reader::{spawn_line_reader, ReaderStats};
pub use writer::EmissionWriter;

/// Destination for emitted hues.
pub trait HueSink: Send {
    /// Deliver one emission.
    fn send(&mut self, emission: &HueEmission) -> HueshiftResult<()>;

    /// Flush anything buffered. Called once when the runner stops.
    fn flush(&mut self) -> HueshiftResult<()> {
        Ok(())
    }

    /// Sink name for logging.
    fn name(&self) -> &str;
}

/// Sink that only logs each emission.
#[derive(Debug, Default)]
pub struct LogSink {
    delivered: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl HueSink for LogSink {
    fn send(&mut self, emission: &HueEmission) -> HueshiftResult<()> {
        self.delivered += 1;
        tracing::info!(
            t = emission.timestamp_ms,
            hue = emission.hue,
            dominant = %emission.dominant,
            "Hue"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub events: u64,
    pub recognized_events: u64,
    pub unrecognized_events: u64,
    pub malformed_values: u64,
    pub emissions: u64,
    pub sink_errors: u64,
    pub idle_timeouts: u64,
    pub elapsed_ms: u64,
}

/// Single consumer that feeds queued events through the pipeline.
pub struct StreamRunner<S: HueSink> {
    pipeline: EmotionPipeline,
    queue: EventQueue,
    sink: S,
    clock: PipelineClock,
    idle_timeout: Duration,
    use_event_time: bool,
    stop_flag: Arc<AtomicBool>,
    sink_errors: u64,
}

impl<S: HueSink> StreamRunner<S> {
    pub fn new(pipeline: EmotionPipeline, queue: EventQueue, sink: S, config: &ProcessingConfig) -> Self {
        Self {
            pipeline,
            queue,
            sink,
            clock: PipelineClock::start(),
            idle_timeout: PipelineClock::ms_to_duration(config.idle_timeout_ms.max(1)),
            use_event_time: false,
            stop_flag: Arc::new(AtomicBool::new(false)),
            sink_errors: 0,
        }
    }

    /// Stamp emissions with each event's own `t` when it has one.
    pub fn use_event_time(mut self, enabled: bool) -> Self {
        self.use_event_time = enabled;
        self
    }

    /// Consume events until the queue closes or the stop flag is set.
    ///
    /// The stop flag is checked between waits, so a stop request takes
    /// effect within one idle timeout.
    pub async fn run(&mut self) -> RunSummary {
        tracing::info!(
            sink = %self.sink.name(),
            idle_timeout_ms = self.idle_timeout.as_millis() as u64,
            event_time = self.use_event_time,
            epoch = %self.clock.epoch_wall(),
            "Stream runner started"
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.queue.wait(self.idle_timeout).await {
                WaitResult::Event(event) => self.handle(&event),
                WaitResult::TimedOut => self.handle_idle(),
                WaitResult::Closed => {
                    tracing::info!("Event queue closed");
                    break;
                }
            }
        }

        if let Err(e) = self.sink.flush() {
            self.sink_errors += 1;
            tracing::warn!(error = %e, sink = %self.sink.name(), "Failed to flush sink");
        }

        let summary = self.summary();
        tracing::info!(
            events = summary.events,
            recognized = summary.recognized_events,
            unrecognized = summary.unrecognized_events,
            emissions = summary.emissions,
            sink_errors = summary.sink_errors,
            elapsed_ms = summary.elapsed_ms,
            "Stream runner stopped"
        );
        for (name, count) in self.pipeline.diagnostics().top_unrecognized(10) {
            tracing::info!(name, count, "Unrecognized parameter");
        }
        summary
    }

    fn handle(&mut self, event: &ParameterEvent) {
        let now_ms = match event.timestamp_ms {
            Some(t) if self.use_event_time => t,
            _ => self.clock.elapsed_ms(),
        };
        if let Some(emission) = self.pipeline.process(event, now_ms) {
            if let Err(e) = self.sink.send(&emission) {
                self.sink_errors += 1;
                tracing::warn!(error = %e, sink = %self.sink.name(), "Failed to deliver hue");
            }
        }
    }

    fn handle_idle(&mut self) {
        self.pipeline.note_idle();
        let diag = self.pipeline.diagnostics();
        tracing::warn!(
            idle_ms = self.idle_timeout.as_millis() as u64,
            total_events = diag.total_events,
            recognized = diag.recognized_events,
            unrecognized = diag.unrecognized_events,
            "No parameter events received"
        );
        for (name, count) in diag.top_unrecognized(5) {
            tracing::debug!(name, count, "Unrecognized parameter");
        }
    }

    /// Totals so far.
    pub fn summary(&self) -> RunSummary {
        let diag = self.pipeline.diagnostics();
        RunSummary {
            events: diag.total_events,
            recognized_events: diag.recognized_events,
            unrecognized_events: diag.unrecognized_events,
            malformed_values: diag.malformed_values,
            emissions: diag.emissions,
            sink_errors: self.sink_errors,
            idle_timeouts: diag.idle_timeouts,
            elapsed_ms: self.clock.elapsed_ms(),
        }
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn pipeline(&self) -> &EmotionPipeline {
        &self.pipeline
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
