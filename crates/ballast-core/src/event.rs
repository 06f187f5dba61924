//! Lifecycle events emitted by raw buffers.
//!
//! A buffer emits exactly one [`BufferEvent::Allocated`] at construction
//! and exactly one terminal event: [`BufferEvent::Released`] when the owner
//! releases it, or [`BufferEvent::Reclaimed`] when it was dropped while
//! still live.

use std::fmt;

use crate::id::{BlockAddr, BlockId};

/// A buffer lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferEvent {
    /// A block was allocated and zero-filled.
    Allocated {
        /// Identity of the new block.
        id: BlockId,
        /// Base address of the block.
        addr: BlockAddr,
        /// Size in bytes.
        len: usize,
    },
    /// A block was freed by an explicit release.
    Released {
        /// Identity of the freed block.
        id: BlockId,
        /// Base address the block occupied.
        addr: BlockAddr,
    },
    /// A block was freed by the drop backstop because its owner never
    /// released it.
    Reclaimed {
        /// Identity of the leaked block.
        id: BlockId,
        /// Base address the block occupied.
        addr: BlockAddr,
        /// Size in bytes.
        len: usize,
    },
}

impl BufferEvent {
    /// The block this event refers to.
    pub fn id(&self) -> BlockId {
        match *self {
            Self::Allocated { id, .. } | Self::Released { id, .. } | Self::Reclaimed { id, .. } => {
                id
            }
        }
    }

    /// The block's base address.
    pub fn addr(&self) -> BlockAddr {
        match *self {
            Self::Allocated { addr, .. }
            | Self::Released { addr, .. }
            | Self::Reclaimed { addr, .. } => addr,
        }
    }

    /// Whether this event ends the block's lifetime.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Allocated { .. })
    }
}

impl fmt::Display for BufferEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocated { id, addr, len } => {
                write!(f, "[alloc] {len} bytes at {addr} (block {id})")
            }
            Self::Released { id, addr } => write!(f, "[free ] block {id} at {addr}"),
            Self::Reclaimed { id, addr, len } => write!(
                f,
                "[gc   ] block {id} at {addr} ({len} bytes) reclaimed without explicit release"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_all_variants() {
        let id = BlockId::next();
        let addr = BlockAddr(0x1000);
        let events = [
            BufferEvent::Allocated { id, addr, len: 5 },
            BufferEvent::Released { id, addr },
            BufferEvent::Reclaimed { id, addr, len: 5 },
        ];
        for e in events {
            assert_eq!(e.id(), id);
            assert_eq!(e.addr(), addr);
        }
        assert!(!events[0].is_terminal());
        assert!(events[1].is_terminal());
        assert!(events[2].is_terminal());
    }

    #[test]
    fn trace_lines() {
        let id = BlockId::next();
        let addr = BlockAddr(0x20);
        let alloc = BufferEvent::Allocated { id, addr, len: 5 }.to_string();
        assert_eq!(alloc, format!("[alloc] 5 bytes at 0x20 (block {id})"));
        let free = BufferEvent::Released { id, addr }.to_string();
        assert!(free.starts_with("[free ]"));
        let gc = BufferEvent::Reclaimed { id, addr, len: 10 }.to_string();
        assert!(gc.contains("without explicit release"));
    }
}
