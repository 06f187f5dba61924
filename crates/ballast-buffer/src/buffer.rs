//! The [`RawBuffer`] type: a fixed-size, zero-initialised byte block with
//! bounds-checked access and exactly-once release.
//!
//! A buffer has two states, `Live` and `Released`, and only ever moves
//! forward. [`RawBuffer::release`] is the deterministic path. `Drop` is the
//! backstop: if the buffer is still live when dropped, it frees the block
//! and reports a `Reclaimed` event instead of `Released`.

use std::fmt;

use ballast_core::{BlockAddr, BlockId, BufferError, BufferEvent, SharedSink};

use crate::config::{BufferConfig, LeakDiagnostics};
use crate::raw::RawBlock;
use crate::scope::ScopedBuffer;

/// Lifecycle state of a [`RawBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferState {
    /// Storage is allocated and accessible.
    Live,
    /// Storage has been freed. Terminal.
    Released,
}

/// A manually managed block of raw bytes.
///
/// The block is exclusively owned: the type is `Send` but not `Sync`, and
/// every mutation takes `&mut self`, so the borrow checker serialises
/// access. Length is fixed at construction and never zero.
pub struct RawBuffer {
    id: BlockId,
    addr: BlockAddr,
    len: usize,
    /// `None` once released.
    storage: Option<RawBlock>,
    sink: SharedSink,
    leak_diagnostics: LeakDiagnostics,
}

impl RawBuffer {
    /// Allocate a zeroed buffer of `len` bytes with the default config.
    ///
    /// Fails with [`BufferError::InvalidArgument`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self, BufferError> {
        Self::with_config(len, &BufferConfig::default())
    }

    /// Allocate a zeroed buffer of `len` bytes.
    ///
    /// The config and length are validated before anything is allocated,
    /// so a failed call leaves no block behind and emits no event. On
    /// success the sink receives [`BufferEvent::Allocated`].
    pub fn with_config(len: usize, config: &BufferConfig) -> Result<Self, BufferError> {
        config.validate()?;
        config.check_len(len)?;
        let block = RawBlock::alloc_zeroed(len)?;
        let id = BlockId::next();
        let addr = BlockAddr(block.addr());
        config.sink.record(BufferEvent::Allocated { id, addr, len });
        Ok(Self {
            id,
            addr,
            len,
            storage: Some(block),
            sink: config.sink.clone(),
            leak_diagnostics: config.leak_diagnostics,
        })
    }

    /// Process-unique identity of the block.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Base address the block was allocated at.
    ///
    /// Still reported after release, for correlating trace output.
    pub fn addr(&self) -> BlockAddr {
        self.addr
    }

    /// Length in bytes. Unchanged by release.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: zero-length buffers cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BufferState {
        if self.storage.is_some() {
            BufferState::Live
        } else {
            BufferState::Released
        }
    }

    /// Whether the storage has been freed.
    pub fn is_released(&self) -> bool {
        self.storage.is_none()
    }

    /// Stderr diagnostic mode used if this buffer is leaked.
    pub fn leak_diagnostics(&self) -> LeakDiagnostics {
        self.leak_diagnostics
    }

    /// Read the byte at `index`.
    ///
    /// Fails with [`BufferError::UseAfterRelease`] after release, then
    /// with [`BufferError::IndexOutOfRange`] if `index >= len`.
    pub fn read(&self, index: usize) -> Result<u8, BufferError> {
        let len = self.len;
        self.as_slice()?
            .get(index)
            .copied()
            .ok_or(BufferError::IndexOutOfRange { index, len })
    }

    /// Store `value` at `index`. Fails under the same conditions as
    /// [`read`](Self::read); a failed write changes nothing.
    pub fn write(&mut self, index: usize, value: u8) -> Result<(), BufferError> {
        let len = self.len;
        let slot = self
            .as_mut_slice()?
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Read the byte at `index`, or `None` if released or out of range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.read(index).ok()
    }

    /// The whole block as a byte slice.
    pub fn as_slice(&self) -> Result<&[u8], BufferError> {
        self.storage
            .as_ref()
            .map(RawBlock::as_slice)
            .ok_or(BufferError::UseAfterRelease { id: self.id })
    }

    /// The whole block as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> Result<&mut [u8], BufferError> {
        let id = self.id;
        self.storage
            .as_mut()
            .map(RawBlock::as_mut_slice)
            .ok_or(BufferError::UseAfterRelease { id })
    }

    /// Set every byte to `value`.
    pub fn fill(&mut self, value: u8) -> Result<(), BufferError> {
        self.as_mut_slice()?.fill(value);
        Ok(())
    }

    /// Free the storage.
    ///
    /// The first call on a live buffer frees the block, emits
    /// [`BufferEvent::Released`], and returns `true`. Every later call is a
    /// no-op that returns `false` and emits nothing.
    pub fn release(&mut self) -> bool {
        if !self.free_storage() {
            return false;
        }
        self.sink.record(BufferEvent::Released {
            id: self.id,
            addr: self.addr,
        });
        true
    }

    /// Hand the buffer to a guard that releases it when the scope ends.
    pub fn scoped(self) -> ScopedBuffer {
        ScopedBuffer::new(self)
    }

    /// Drop the block if still held. Returns whether this call freed it.
    ///
    /// The single release routine behind both `release()` and `Drop`;
    /// `Option::take` makes a second free impossible.
    fn free_storage(&mut self) -> bool {
        self.storage.take().is_some()
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        // Touches only this buffer's block and its sink.
        if !self.free_storage() {
            return;
        }
        self.sink.record(BufferEvent::Reclaimed {
            id: self.id,
            addr: self.addr,
            len: self.len,
        });
        #[cfg(debug_assertions)]
        {
            if self.leak_diagnostics == LeakDiagnostics::Warn {
                eprintln!(
                    "ballast: block {} ({} bytes at {}) dropped without release(); reclaimed by drop",
                    self.id, self.len, self.addr,
                );
            }
        }
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("len", &self.len)
            .field("state", &self.state())
            .finish()
    }
}
