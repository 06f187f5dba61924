//! The event sink abstraction that decouples buffers from their observers.

use std::sync::Arc;

use crate::event::BufferEvent;

/// Receives buffer lifecycle events.
///
/// Sinks must be `Send + Sync`: a leaked buffer may be dropped, and its
/// reclaim event recorded, on a thread other than the one that allocated
/// it. `record` is called from `Drop`, so implementations must not panic
/// and should not block for long.
pub trait EventSink: Send + Sync {
    /// Record a single event.
    fn record(&self, event: BufferEvent);
}

/// Shared, type-erased sink handle stored by every buffer.
pub type SharedSink = Arc<dyn EventSink>;

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn record(&self, event: BufferEvent) {
        (**self).record(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn record(&self, event: BufferEvent) {
        (**self).record(event);
    }
}
