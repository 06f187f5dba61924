//! Manually managed raw byte buffers with deterministic release.
//!
//! A [`RawBuffer`] owns one zero-initialised block taken straight from the
//! global allocator. Access is bounds-checked and fails cleanly after
//! release. Storage is freed exactly once: by [`RawBuffer::release`], by a
//! [`ScopedBuffer`] going out of scope, or, as a last resort, by the drop
//! backstop when the owner forgot both.
//!
//! # Architecture
//!
//! ```text
//! with_buffer / ScopedBuffer (deterministic release on every exit path)
//! └── RawBuffer (bounds checks, Live → Released state, event emission)
//!     ├── RawBlock (raw.rs: the only unsafe in the workspace)
//!     └── SharedSink → NullSink | StderrSink | RecordingSink
//!                      | ChannelSink | LeakLedger | FanoutSink
//! ```
//!
//! # Release paths
//!
//! - **Explicit:** `release()` frees the block and emits `Released`.
//! - **Scoped:** dropping a `ScopedBuffer` calls `release()`.
//! - **Backstop:** dropping a live `RawBuffer` frees the block and emits
//!   `Reclaimed` instead. Debug builds also print a leak diagnostic.
//!
//! # Safety
//!
//! `unsafe` is denied crate-wide and re-allowed only in `raw.rs`, which
//! wraps allocation, deallocation, and slice construction. Everything
//! above it is safe code over `&[u8]` / `&mut [u8]`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod ledger;
mod raw;
pub mod scope;
pub mod sink;

// Public re-exports for the primary API surface.
pub use ballast_core::{BlockAddr, BlockId, BufferError, BufferEvent, EventSink, SharedSink};
pub use buffer::{BufferState, RawBuffer};
pub use config::{BufferConfig, LeakDiagnostics};
pub use ledger::LeakLedger;
pub use scope::{with_buffer, ScopedBuffer};
pub use sink::{ChannelSink, FanoutSink, NullSink, RecordingSink, StderrSink};
