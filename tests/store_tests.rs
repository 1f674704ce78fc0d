// Two-sample store tests: retention window and push ordering

mod common;

use std::time::SystemTime;

use common::{raw_snapshot, seconds_after};
use sysdash::store::SampleStore;

#[test]
fn first_push_has_no_previous() {
    let mut store = SampleStore::new();
    let t0 = SystemTime::UNIX_EPOCH;

    let (previous, current) = store.push(raw_snapshot(t0, 100, 100));
    assert!(previous.is_none());
    assert_eq!(current.timestamp, t0);
}

#[test]
fn second_push_pairs_with_the_first() {
    let mut store = SampleStore::new();
    let t0 = SystemTime::UNIX_EPOCH;
    let t1 = seconds_after(t0, 1);

    store.push(raw_snapshot(t0, 100, 100));
    let (previous, current) = store.push(raw_snapshot(t1, 200, 200));

    let previous = previous.expect("previous after second push");
    assert_eq!(previous.timestamp, t0);
    assert_eq!(current.timestamp, t1);
}

#[test]
fn third_push_evicts_the_oldest() {
    let mut store = SampleStore::new();
    let t0 = SystemTime::UNIX_EPOCH;
    let t1 = seconds_after(t0, 1);
    let t2 = seconds_after(t0, 2);

    store.push(raw_snapshot(t0, 100, 100));
    store.push(raw_snapshot(t1, 200, 200));
    let (previous, current) = store.push(raw_snapshot(t2, 300, 300));

    assert_eq!(previous.expect("previous").timestamp, t1);
    assert_eq!(current.timestamp, t2);
    assert_eq!(store.previous().expect("stored previous").timestamp, t1);
    assert_eq!(store.current().expect("stored current").timestamp, t2);
}

#[test]
fn degraded_snapshots_are_stored_like_any_other() {
    use sysdash::models::Section;

    let mut store = SampleStore::new();
    let t0 = SystemTime::UNIX_EPOCH;
    let t1 = seconds_after(t0, 1);

    store.push(common::degraded_snapshot(t0, Section::Network, "read failed"));
    let (previous, _current) = store.push(raw_snapshot(t1, 200, 200));

    let previous = previous.expect("previous");
    assert!(previous.net_io.is_none());
    assert_eq!(previous.degraded.len(), 1);
}
