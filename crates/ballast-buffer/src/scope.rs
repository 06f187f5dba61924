//! Scoped acquisition: release bound to a lexical scope.
//!
//! [`ScopedBuffer`] releases its buffer when dropped, so every exit path
//! (normal return, early `?` return, or panic unwinding) takes the
//! deterministic `Released` path rather than the drop backstop.
//! [`with_buffer`] is the closure form.

use std::ops::{Deref, DerefMut};

use ballast_core::BufferError;

use crate::buffer::RawBuffer;
use crate::config::BufferConfig;

/// Guard that owns a [`RawBuffer`] and releases it on drop.
///
/// Dereferences to the buffer, so all accessors are available directly.
/// Releasing early through the guard is fine: the drop-time release is
/// then a no-op.
#[derive(Debug)]
#[must_use = "dropping the guard releases the buffer immediately"]
pub struct ScopedBuffer {
    buffer: RawBuffer,
}

impl ScopedBuffer {
    /// Take ownership of `buffer`.
    pub fn new(buffer: RawBuffer) -> Self {
        Self { buffer }
    }

    /// Allocate a buffer and guard it in one step.
    pub fn acquire(len: usize, config: &BufferConfig) -> Result<Self, BufferError> {
        RawBuffer::with_config(len, config).map(Self::new)
    }
}

impl Deref for ScopedBuffer {
    type Target = RawBuffer;

    fn deref(&self) -> &RawBuffer {
        &self.buffer
    }
}

impl DerefMut for ScopedBuffer {
    fn deref_mut(&mut self) -> &mut RawBuffer {
        &mut self.buffer
    }
}

impl Drop for ScopedBuffer {
    fn drop(&mut self) {
        self.buffer.release();
    }
}

/// Run `f` with a freshly allocated buffer, releasing it on every exit.
///
/// Allocation failures convert into `E`. The buffer is released after `f`
/// returns, whether it returned `Ok`, `Err`, or panicked.
///
/// ```
/// use ballast_buffer::{with_buffer, BufferConfig, BufferError};
///
/// let sum = with_buffer(5, &BufferConfig::new(), |buf| {
///     buf.write(0, 10)?;
///     buf.write(1, 20)?;
///     Ok::<_, BufferError>(buf.read(0)? as u32 + buf.read(1)? as u32)
/// })
/// .unwrap();
/// assert_eq!(sum, 30);
/// ```
pub fn with_buffer<T, E, F>(len: usize, config: &BufferConfig, f: F) -> Result<T, E>
where
    F: FnOnce(&mut RawBuffer) -> Result<T, E>,
    E: From<BufferError>,
{
    let mut scoped = ScopedBuffer::acquire(len, config)?;
    f(&mut scoped)
}
