//! Error types for Ballast buffer operations.
//!
//! Every failure is a caller logic error or an allocator refusal. None are
//! transient, so nothing in the workspace retries them.

use std::error::Error;
use std::fmt;

use crate::id::BlockId;

/// Errors that can occur while creating or accessing a raw buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A construction argument or configuration value was rejected.
    ///
    /// Fatal to the construction call; no allocation remains behind.
    InvalidArgument {
        /// Human-readable description of the rejected value.
        reason: String,
    },
    /// A read or write index fell outside `[0, len)`.
    ///
    /// The buffer remains live and usable.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the buffer in bytes.
        len: usize,
    },
    /// The buffer was accessed after its storage was released.
    UseAfterRelease {
        /// The released block.
        id: BlockId,
    },
    /// The global allocator could not satisfy the request.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
}

impl BufferError {
    /// Shorthand for [`BufferError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for buffer of length {len}")
            }
            Self::UseAfterRelease { id } => {
                write!(f, "block {id} accessed after release")
            }
            Self::AllocationFailed { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
        }
    }
}

impl Error for BufferError {}
