//! Benchmark profiles and utilities for Ballast raw buffers.
//!
//! Provides pre-built configurations so every benchmark measures the same
//! thing:
//!
//! - [`quiet_config`]: `NullSink`, no leak diagnostics
//! - [`BENCH_SIZES`]: buffer sizes from one cache line to 1 MiB
//! - [`index_pattern`]: deterministic pseudo-random access indices

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use ballast_buffer::{BufferConfig, LeakDiagnostics, NullSink};

/// Buffer sizes, in bytes, exercised by the allocation benchmarks.
pub const BENCH_SIZES: [usize; 4] = [64, 4 * 1024, 64 * 1024, 1024 * 1024];

/// Config with a discarding sink and no stderr output.
pub fn quiet_config() -> BufferConfig {
    BufferConfig::new()
        .with_sink(Arc::new(NullSink))
        .with_leak_diagnostics(LeakDiagnostics::Silent)
}

/// `count` indices in `[0, len)`, scattered with a xorshift sequence so
/// repeated runs touch the same bytes. Empty when `len` is zero.
pub fn index_pattern(len: usize, count: usize, seed: u64) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % len as u64) as usize
        })
        .collect()
}
