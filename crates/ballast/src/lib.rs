//! Ballast: manually managed raw byte buffers with scoped, exactly-once
//! release.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Ballast sub-crates. For most users, adding `ballast` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ballast::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let config = BufferConfig::new().with_sink(sink.clone());
//!
//! // Scoped acquisition: released when the guard leaves scope.
//! {
//!     let mut buf = ScopedBuffer::acquire(5, &config).unwrap();
//!     buf.write(0, 10).unwrap();
//!     buf.write(1, 20).unwrap();
//!     assert_eq!(buf.read(0).unwrap(), 10);
//! }
//! assert_eq!(sink.released_count(), 1);
//!
//! // Explicit release, then a failed access.
//! let mut buf = RawBuffer::with_config(5, &config).unwrap();
//! buf.release();
//! assert!(matches!(buf.read(0), Err(BufferError::UseAfterRelease { .. })));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`buffer`] | `ballast-buffer` | `RawBuffer`, scoped acquisition, config, sinks, ledger |
//! | [`types`] | `ballast-core` | IDs, events, errors, the `EventSink` trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Raw buffers, scoped acquisition, and event sinks (`ballast-buffer`).
pub use ballast_buffer as buffer;

/// Block identities, lifecycle events, errors, and the
/// [`types::EventSink`] trait (`ballast-core`).
pub use ballast_core as types;

/// Common imports for typical Ballast usage.
///
/// ```rust
/// use ballast::prelude::*;
/// ```
pub mod prelude {
    // Buffers and scoped acquisition
    pub use ballast_buffer::{with_buffer, BufferState, RawBuffer, ScopedBuffer};

    // Configuration
    pub use ballast_buffer::{BufferConfig, LeakDiagnostics};

    // Sinks
    pub use ballast_buffer::{
        ChannelSink, FanoutSink, LeakLedger, NullSink, RecordingSink, StderrSink,
    };

    // Core types and traits
    pub use ballast_core::{BlockAddr, BlockId, BufferError, BufferEvent, EventSink, SharedSink};
}
