//! Live-block accounting built from the event stream.
//!
//! [`LeakLedger`] is an [`EventSink`] that tracks which blocks are still
//! live, how many bytes they hold, and how many blocks had to be reclaimed
//! by the drop backstop. Hosts install it (usually behind a
//! [`FanoutSink`](crate::FanoutSink)) to answer "did anything leak?" at
//! shutdown.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ballast_core::{BlockAddr, BlockId, BufferEvent, EventSink};
use indexmap::IndexMap;

/// One live block as seen by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveBlock {
    /// Base address of the block.
    pub addr: BlockAddr,
    /// Size in bytes.
    pub len: usize,
}

/// Point-in-time counters from a [`LeakLedger`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// Blocks allocated so far.
    pub allocated: u64,
    /// Blocks freed by an explicit release.
    pub released: u64,
    /// Blocks freed by the drop backstop.
    pub reclaimed: u64,
    /// Bytes currently held by live blocks.
    pub live_bytes: usize,
    /// Highest `live_bytes` observed.
    pub peak_live_bytes: usize,
}

#[derive(Default)]
struct LedgerState {
    /// Live blocks in allocation order.
    live: IndexMap<BlockId, LiveBlock>,
    stats: LedgerStats,
}

/// Event sink that tracks live blocks and reclaimed leaks.
#[derive(Default)]
pub struct LeakLedger {
    state: Mutex<LedgerState>,
}

impl LeakLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks currently live.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Bytes currently held by live blocks.
    pub fn live_bytes(&self) -> usize {
        self.lock().stats.live_bytes
    }

    /// Live blocks in allocation order.
    pub fn live_blocks(&self) -> Vec<(BlockId, LiveBlock)> {
        self.lock().live.iter().map(|(&id, &b)| (id, b)).collect()
    }

    /// Whether `id` is currently live.
    pub fn is_live(&self, id: BlockId) -> bool {
        self.lock().live.contains_key(&id)
    }

    /// Number of blocks freed by the drop backstop.
    pub fn reclaimed_count(&self) -> u64 {
        self.lock().stats.reclaimed
    }

    /// Snapshot of all counters.
    pub fn stats(&self) -> LedgerStats {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for LeakLedger {
    fn record(&self, event: BufferEvent) {
        let mut state = self.lock();
        match event {
            BufferEvent::Allocated { id, addr, len } => {
                state.live.insert(id, LiveBlock { addr, len });
                state.stats.allocated += 1;
                state.stats.live_bytes += len;
                state.stats.peak_live_bytes =
                    state.stats.peak_live_bytes.max(state.stats.live_bytes);
            }
            BufferEvent::Released { id, .. } => {
                if let Some(block) = state.live.shift_remove(&id) {
                    state.stats.released += 1;
                    state.stats.live_bytes -= block.len;
                }
            }
            BufferEvent::Reclaimed { id, .. } => {
                if let Some(block) = state.live.shift_remove(&id) {
                    state.stats.reclaimed += 1;
                    state.stats.live_bytes -= block.len;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(ledger: &LeakLedger, len: usize) -> BlockId {
        let id = BlockId::next();
        ledger.record(BufferEvent::Allocated {
            id,
            addr: BlockAddr(0x1000),
            len,
        });
        id
    }

    #[test]
    fn tracks_live_bytes_and_peak() {
        let ledger = LeakLedger::new();
        let a = alloc(&ledger, 10);
        let b = alloc(&ledger, 20);
        assert_eq!(ledger.live_count(), 2);
        assert_eq!(ledger.live_bytes(), 30);

        ledger.record(BufferEvent::Released {
            id: a,
            addr: BlockAddr(0x1000),
        });
        assert_eq!(ledger.live_bytes(), 20);
        assert!(!ledger.is_live(a));
        assert!(ledger.is_live(b));

        let stats = ledger.stats();
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.peak_live_bytes, 30);
    }

    #[test]
    fn reclaim_counts_as_leak() {
        let ledger = LeakLedger::new();
        let id = alloc(&ledger, 8);
        ledger.record(BufferEvent::Reclaimed {
            id,
            addr: BlockAddr(0x1000),
            len: 8,
        });
        assert_eq!(ledger.reclaimed_count(), 1);
        assert_eq!(ledger.live_count(), 0);
        assert_eq!(ledger.live_bytes(), 0);
    }

    #[test]
    fn live_blocks_keep_allocation_order() {
        let ledger = LeakLedger::new();
        let ids: Vec<_> = (1..=4).map(|n| alloc(&ledger, n)).collect();
        ledger.record(BufferEvent::Released {
            id: ids[1],
            addr: BlockAddr(0x1000),
        });
        let live: Vec<_> = ledger.live_blocks().into_iter().map(|(id, _)| id).collect();
        assert_eq!(live, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn terminal_event_for_unknown_block_is_ignored() {
        let ledger = LeakLedger::new();
        ledger.record(BufferEvent::Released {
            id: BlockId::next(),
            addr: BlockAddr(0x1000),
        });
        assert_eq!(ledger.stats(), LedgerStats::default());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_bytes_equals_sum_of_live_blocks(
                ops in proptest::collection::vec((1usize..64, any::<bool>(), any::<bool>()), 1..40),
            ) {
                let ledger = LeakLedger::new();
                for (len, free, via_drop) in ops {
                    let id = alloc(&ledger, len);
                    if free {
                        let addr = BlockAddr(0x1000);
                        let event = if via_drop {
                            BufferEvent::Reclaimed { id, addr, len }
                        } else {
                            BufferEvent::Released { id, addr }
                        };
                        ledger.record(event);
                    }
                }
                let sum: usize = ledger.live_blocks().iter().map(|(_, b)| b.len).sum();
                prop_assert_eq!(ledger.live_bytes(), sum);
                let stats = ledger.stats();
                prop_assert_eq!(
                    stats.allocated,
                    stats.released + stats.reclaimed + ledger.live_count() as u64
                );
            }
        }
    }
}
