//! Low-level primitives for raw block allocation.
//!
//! This is the only module in the workspace that contains `unsafe` code.
//! Each `unsafe` block carries a `// SAFETY:` comment. Everything outside
//! this module works on the safe slices returned here.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::slice;

use ballast_core::BufferError;

/// An owned, zero-initialised block of bytes from the global allocator.
///
/// Freed when dropped. Never empty: zero-size layouts are rejected at
/// allocation because `alloc_zeroed` requires a non-zero size.
pub(crate) struct RawBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: `RawBlock` is the sole owner of its allocation. No other value
// holds the pointer, so moving the block to another thread moves the only
// access path with it.
unsafe impl Send for RawBlock {}

impl RawBlock {
    /// Allocate `len` zeroed bytes.
    pub(crate) fn alloc_zeroed(len: usize) -> Result<Self, BufferError> {
        if len == 0 {
            return Err(BufferError::invalid("raw block length must be non-zero"));
        }
        let layout =
            Layout::array::<u8>(len).map_err(|_| BufferError::AllocationFailed { requested: len })?;
        // SAFETY: `layout` has a non-zero size (checked above).
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr).ok_or(BufferError::AllocationFailed { requested: len })?;
        Ok(Self { ptr, layout })
    }

    /// Size of the block in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Base address, for trace output only.
    pub(crate) fn addr(&self) -> usize {
        self.ptr.as_ptr().addr()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` points to `len()` initialised bytes (zeroed at
        // allocation) that stay valid until `self` is dropped. The shared
        // borrow of `self` prevents concurrent mutation.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as for `as_slice`; the exclusive borrow of `self`
        // guarantees no other reference to the bytes exists.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }
}

impl Drop for RawBlock {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by `alloc_zeroed` with exactly this
        // layout, and drop runs at most once.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}
