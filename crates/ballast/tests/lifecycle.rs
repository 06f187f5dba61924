//! End-to-end buffer lifecycle scenarios through the facade crate.

use ballast::prelude::*;
use ballast_test_utils::{Ending, Probe};

#[test]
fn create_write_read_release_then_fail() {
    let probe = Probe::new();
    let mut buf = RawBuffer::with_config(5, &probe.config).unwrap();
    buf.write(0, 10).unwrap();
    buf.write(1, 20).unwrap();
    assert_eq!(buf.read(0).unwrap(), 10);
    assert_eq!(buf.read(1).unwrap(), 20);

    assert!(buf.release());
    let id = buf.id();
    assert_eq!(buf.read(0), Err(BufferError::UseAfterRelease { id }));

    drop(buf);
    probe.assert_lifecycle(id, Ending::Released);
}

#[test]
fn create_zero_fails_with_invalid_argument() {
    let probe = Probe::new();
    let err = RawBuffer::with_config(0, &probe.config).unwrap_err();
    assert!(matches!(err, BufferError::InvalidArgument { .. }));
    assert!(probe.events.is_empty());
    assert_eq!(probe.ledger.stats().allocated, 0);
}

#[test]
fn create_ten_and_drop_fires_backstop_once() {
    let probe = Probe::new();
    let id = {
        let buf = RawBuffer::with_config(10, &probe.config).unwrap();
        buf.id()
    };
    probe.assert_lifecycle(id, Ending::Reclaimed);
    assert_eq!(probe.events.released_count(), 0);
    assert_eq!(probe.ledger.reclaimed_count(), 1);
    assert_eq!(probe.ledger.live_count(), 0);
}

#[test]
fn double_release_emits_one_event() {
    let probe = Probe::new();
    let mut buf = RawBuffer::with_config(3, &probe.config).unwrap();
    let id = buf.id();
    assert!(buf.release());
    assert!(!buf.release());
    drop(buf);
    probe.assert_lifecycle(id, Ending::Released);
}

#[test]
fn out_of_range_leaves_buffer_live() {
    let probe = Probe::new();
    let mut buf = RawBuffer::with_config(4, &probe.config).unwrap();
    assert_eq!(
        buf.write(4, 1),
        Err(BufferError::IndexOutOfRange { index: 4, len: 4 })
    );
    assert_eq!(buf.state(), BufferState::Live);
    probe.assert_lifecycle(buf.id(), Ending::Live);
    assert!(probe.ledger.is_live(buf.id()));
    buf.release();
}

#[test]
fn oversized_request_rejected_before_allocation() {
    let probe = Probe::with_max_len(64);
    assert!(RawBuffer::with_config(65, &probe.config).is_err());
    assert!(probe.events.is_empty());
    assert!(RawBuffer::with_config(64, &probe.config).is_ok());
}

#[test]
fn ledger_tracks_mixed_endings() {
    let probe = Probe::new();
    let mut kept = RawBuffer::with_config(8, &probe.config).unwrap();
    let mut released = RawBuffer::with_config(4, &probe.config).unwrap();
    let leaked = RawBuffer::with_config(2, &probe.config).unwrap();
    assert_eq!(probe.ledger.live_bytes(), 14);

    released.release();
    drop(leaked);

    let stats = probe.ledger.stats();
    assert_eq!(stats.allocated, 3);
    assert_eq!(stats.released, 1);
    assert_eq!(stats.reclaimed, 1);
    assert_eq!(stats.live_bytes, 8);
    assert_eq!(stats.peak_live_bytes, 14);

    let live: Vec<_> = probe
        .ledger
        .live_blocks()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(live, vec![kept.id()]);
    kept.release();
}

#[test]
fn event_order_per_block() {
    let probe = Probe::new();
    let mut buf = RawBuffer::with_config(2, &probe.config).unwrap();
    buf.write(1, 5).unwrap();
    let id = buf.id();
    let addr = buf.addr();
    buf.release();
    assert_eq!(
        probe.events_for(id),
        vec![
            BufferEvent::Allocated { id, addr, len: 2 },
            BufferEvent::Released { id, addr },
        ]
    );
}
