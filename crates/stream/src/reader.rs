//! JSONL event reader feeding the queue.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

use hueshift_common::error::HueshiftResult;
use hueshift_expression_model::event::parse_event_line;

use crate::queue::EventSender;

/// Line counts from one reader task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub forwarded: u64,
    pub skipped: u64,
}

/// Read JSONL events from `reader` and forward them until EOF.
///
/// Unparsable lines are logged and skipped. The sender is dropped when the
/// task ends, which closes the queue if it was the last one.
pub fn spawn_line_reader<R>(reader: R, sender: EventSender) -> JoinHandle<HueshiftResult<ReaderStats>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        let mut stats = ReaderStats::default();

        while let Some(line) = lines.next_line().await? {
            match parse_event_line(&line) {
                Ok(Some(event)) => {
                    if sender.send(event).await.is_err() {
                        tracing::debug!("Event queue closed, reader stopping");
                        break;
                    }
                    stats.forwarded += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    stats.skipped += 1;
                    tracing::warn!(error = %e, line = %line, "Skipping unparsable event line");
                }
            }
        }

        tracing::debug!(
            forwarded = stats.forwarded,
            skipped = stats.skipped,
            "Event reader finished"
        );
        Ok(stats)
    })
}
