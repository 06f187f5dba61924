//! Ballast resource management walkthrough.
//!
//! Demonstrates:
//!   1. Scoped acquisition: a buffer released automatically at scope end
//!   2. Bounds checking: an out-of-range write rejected, buffer still usable
//!   3. Use after release: access to a released buffer rejected
//!   4. The drop backstop: a buffer whose owner forgot to release it
//!
//! Run with:
//!   cargo run --example resource_management

use std::sync::Arc;

use ballast::prelude::*;

// ─── Buffer sizes ───────────────────────────────────────────────

const SCOPED_LEN: usize = 5;
const LEAKED_LEN: usize = 10;

// ─── Test B: forgetting to release ──────────────────────────────
//
// The buffer goes out of scope still live. Drop frees the block and
// reports a Reclaimed event instead of Released.

fn create_garbage(config: &BufferConfig) -> Result<(), BufferError> {
    let mut leaked = RawBuffer::with_config(LEAKED_LEN, config)?;
    leaked.write(0, 99)?;
    Ok(())
}

fn main() -> Result<(), BufferError> {
    println!("=== Ballast: resource management ===\n");

    let ledger = Arc::new(LeakLedger::new());
    let sink = FanoutSink::new(vec![Arc::new(StderrSink), ledger.clone()]);
    let config = BufferConfig::new()
        .with_sink(Arc::new(sink))
        .with_leak_diagnostics(LeakDiagnostics::Warn);

    // ─── Test A: scoped acquisition ─────────────────────────────

    println!("--- Test A: scoped buffer ---");
    {
        let mut array = ScopedBuffer::acquire(SCOPED_LEN, &config)?;
        array.write(0, 10)?;
        array.write(1, 20)?;
        println!("Index 0: {}", array.read(0)?);
        println!("Index 1: {}", array.read(1)?);

        match array.write(SCOPED_LEN, 30) {
            Err(e) => println!("Rejected: {e}"),
            Ok(()) => unreachable!("write past the end must fail"),
        }
    }
    println!("Outside scope.\n");

    // ─── Explicit release ───────────────────────────────────────

    println!("--- Explicit release ---");
    let mut array = RawBuffer::with_config(SCOPED_LEN, &config)?;
    array.write(2, 7)?;
    array.release();
    array.release();
    match array.read(2) {
        Err(e) => println!("Rejected: {e}"),
        Ok(v) => unreachable!("read after release returned {v}"),
    }
    println!();

    println!("--- Test B: forgetting release ---");
    create_garbage(&config)?;
    println!("Backstop done.\n");

    let stats = ledger.stats();
    println!(
        "allocated={} released={} reclaimed={} live_bytes={}",
        stats.allocated, stats.released, stats.reclaimed, stats.live_bytes
    );
    Ok(())
}
