//! Test fixtures and lifecycle assertions for Ballast development.
//!
//! Provides a [`Probe`] that bundles a [`BufferConfig`] wired to a
//! [`RecordingSink`] and a [`LeakLedger`], plus [`assert_lifecycle`] for
//! checking the per-block event order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use ballast_buffer::{BufferConfig, FanoutSink, LeakDiagnostics, LeakLedger, RecordingSink};
use ballast_core::{BlockId, BufferEvent};

/// How a block's lifetime is expected to end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    /// Still live: only `Allocated` so far.
    Live,
    /// Ended by an explicit or scoped release.
    Released,
    /// Ended by the drop backstop.
    Reclaimed,
}

/// A config whose events land in both a recorder and a ledger.
///
/// Leak diagnostics are silenced so test output stays clean.
pub struct Probe {
    pub config: BufferConfig,
    pub events: Arc<RecordingSink>,
    pub ledger: Arc<LeakLedger>,
}

impl Probe {
    pub fn new() -> Self {
        let events = Arc::new(RecordingSink::new());
        let ledger = Arc::new(LeakLedger::new());
        let fanout = FanoutSink::new(vec![events.clone(), ledger.clone()]);
        let config = BufferConfig::new()
            .with_sink(Arc::new(fanout))
            .with_leak_diagnostics(LeakDiagnostics::Silent);
        Self {
            config,
            events,
            ledger,
        }
    }

    /// Same as [`Probe::new`] with a custom maximum length.
    pub fn with_max_len(max_len: usize) -> Self {
        let mut probe = Self::new();
        probe.config.max_len = max_len;
        probe
    }

    /// Events recorded for one block.
    pub fn events_for(&self, id: BlockId) -> Vec<BufferEvent> {
        self.events.events_for(id)
    }

    /// Panic unless `id` went through exactly the expected lifecycle.
    pub fn assert_lifecycle(&self, id: BlockId, ending: Ending) {
        assert_lifecycle(&self.events_for(id), id, ending);
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::new()
    }
}

/// Panic unless `events` is exactly `Allocated` followed by the terminal
/// event named by `ending` (or nothing, for [`Ending::Live`]), all for `id`.
pub fn assert_lifecycle(events: &[BufferEvent], id: BlockId, ending: Ending) {
    let expected_len = if ending == Ending::Live { 1 } else { 2 };
    assert_eq!(
        events.len(),
        expected_len,
        "block {id}: expected {expected_len} events, got {events:?}"
    );
    assert!(
        matches!(events[0], BufferEvent::Allocated { id: got, .. } if got == id),
        "block {id}: first event must be Allocated, got {:?}",
        events[0]
    );
    match ending {
        Ending::Live => {}
        Ending::Released => assert!(
            matches!(events[1], BufferEvent::Released { id: got, .. } if got == id),
            "block {id}: expected Released, got {:?}",
            events[1]
        ),
        Ending::Reclaimed => assert!(
            matches!(events[1], BufferEvent::Reclaimed { id: got, .. } if got == id),
            "block {id}: expected Reclaimed, got {:?}",
            events[1]
        ),
    }
}
