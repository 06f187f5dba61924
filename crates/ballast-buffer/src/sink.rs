//! Stock [`EventSink`] implementations.
//!
//! [`NullSink`] is the default. [`StderrSink`] prints trace lines,
//! [`RecordingSink`] keeps an in-memory log for tests and hosts,
//! [`ChannelSink`] forwards events to another thread, and [`FanoutSink`]
//! broadcasts to several sinks at once.

use std::sync::{Mutex, PoisonError};

use ballast_core::{BlockId, BufferEvent, EventSink, SharedSink};
use crossbeam_channel::{Receiver, Sender};

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: BufferEvent) {}
}

/// Prints each event to stderr as a `ballast:`-prefixed trace line.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl EventSink for StderrSink {
    fn record(&self, event: BufferEvent) {
        eprintln!("ballast: {event}");
    }
}

/// Keeps every event in memory, in arrival order.
///
/// A poisoned lock is recovered rather than propagated: `record` runs
/// inside `Drop`, where a second panic would abort.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BufferEvent>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of all events recorded so far.
    pub fn events(&self) -> Vec<BufferEvent> {
        self.lock().clone()
    }

    /// Events that refer to `id`, in arrival order.
    pub fn events_for(&self, id: BlockId) -> Vec<BufferEvent> {
        self.lock()
            .iter()
            .filter(|e| e.id() == id)
            .copied()
            .collect()
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of `Allocated` events.
    pub fn allocated_count(&self) -> usize {
        self.count(|e| matches!(e, BufferEvent::Allocated { .. }))
    }

    /// Number of `Released` events.
    pub fn released_count(&self) -> usize {
        self.count(|e| matches!(e, BufferEvent::Released { .. }))
    }

    /// Number of `Reclaimed` events.
    pub fn reclaimed_count(&self) -> usize {
        self.count(|e| matches!(e, BufferEvent::Reclaimed { .. }))
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn count(&self, pred: impl Fn(&BufferEvent) -> bool) -> usize {
        self.lock().iter().filter(|e| pred(e)).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BufferEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: BufferEvent) {
        self.lock().push(event);
    }
}

/// Forwards events over a crossbeam channel.
///
/// Once the receiver is gone, events are dropped silently.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<BufferEvent>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<BufferEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink on a fresh unbounded channel, returning the receiver.
    pub fn unbounded() -> (Self, Receiver<BufferEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn record(&self, event: BufferEvent) {
        let _ = self.tx.send(event);
    }
}

/// Broadcasts each event to every inner sink, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<SharedSink>,
}

impl FanoutSink {
    /// Create a fanout over the given sinks.
    pub fn new(sinks: Vec<SharedSink>) -> Self {
        Self { sinks }
    }

    /// Append another sink.
    pub fn push(&mut self, sink: SharedSink) {
        self.sinks.push(sink);
    }

    /// Number of inner sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no inner sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn record(&self, event: BufferEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}
