//! Block identities: the process-unique [`BlockId`] and the raw
//! [`BlockAddr`] carried in trace events.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`BlockId`] allocation.
static BLOCK_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-allocation identifier for a raw block.
///
/// Allocated from a monotonic atomic counter via [`BlockId::next`].
/// Two blocks always have different IDs, even when the allocator hands
/// back the same address for both. Events and ledgers key on the ID, not
/// the address, so address reuse after a free cannot alias two blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    /// Allocate a fresh, unique block ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(BLOCK_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base address of a raw block, as an integer.
///
/// Only ever used for display and correlation in trace output. It is
/// never turned back into a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockAddr(pub usize);

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for BlockAddr {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
