//! Bounded producer → consumer event queue.
//!
//! Any number of producers (threads or tasks) push through cloned
//! [`EventSender`]s; exactly one [`EventQueue`] consumes. The queue closes
//! once every sender is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use hueshift_common::error::{HueshiftError, HueshiftResult};
use hueshift_expression_model::event::ParameterEvent;

/// Create a queue holding at most `capacity` pending events.
pub fn event_queue(capacity: usize) -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, EventQueue { rx })
}

/// Producer half. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<ParameterEvent>,
}

impl EventSender {
    /// Send an event, waiting for space.
    pub async fn send(&self, event: ParameterEvent) -> HueshiftResult<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| HueshiftError::stream("event queue is closed"))
    }

    /// Send without waiting. Fails when the queue is full or closed.
    pub fn try_send(&self, event: ParameterEvent) -> HueshiftResult<()> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => HueshiftError::stream("event queue is full"),
            TrySendError::Closed(_) => HueshiftError::stream("event queue is closed"),
        })
    }

    /// Send from a plain thread, blocking for space.
    ///
    /// Must not be called from inside an async runtime.
    pub fn blocking_send(&self, event: ParameterEvent) -> HueshiftResult<()> {
        self.tx
            .blocking_send(event)
            .map_err(|_| HueshiftError::stream("event queue is closed"))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Outcome of one bounded wait.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitResult {
    Event(ParameterEvent),
    /// Nothing arrived within the timeout. Not an error.
    TimedOut,
    /// Every sender is gone and the queue is drained.
    Closed,
}

/// Consumer half.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::Receiver<ParameterEvent>,
}

impl EventQueue {
    /// Wait up to `timeout` for the next event.
    pub async fn wait(&mut self, timeout: Duration) -> WaitResult {
        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Ok(Some(event)) => WaitResult::Event(event),
            Ok(None) => WaitResult::Closed,
            Err(_) => WaitResult::TimedOut,
        }
    }

    /// Stop accepting new events. Already queued events can still be read.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
