//! Core types and traits for Ballast raw buffers.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Ballast workspace:
//! block identities, lifecycle events, error types, and the event sink
//! trait that hosts implement to observe buffer lifecycles.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod id;
pub mod traits;

pub use error::BufferError;
pub use event::BufferEvent;
pub use id::{BlockAddr, BlockId};
pub use traits::{EventSink, SharedSink};
