// Rate derivation: time-normalized deltas between two consecutive raw
// snapshots. Every output is an `Option<f64>` where `None` means
// unavailable (first tick, clock anomaly, or a missing counter section),
// which is never conflated with a measured zero.

use std::time::SystemTime;

use crate::models::{RateSnapshot, RawSnapshot};

/// Delta between two cumulative counter readings. A decreasing counter
/// (service restart or wraparound) clamps to the raw current value, i.e.
/// the counter is treated as having restarted from zero.
pub(crate) fn counter_delta(previous: u64, current: u64) -> u64 {
    if current < previous {
        current
    } else {
        current - previous
    }
}

/// Elapsed seconds from `previous` to `current`, if strictly positive.
/// Zero or backwards elapsed time is a clock anomaly and yields `None`.
fn elapsed_secs(previous: SystemTime, current: SystemTime) -> Option<f64> {
    let elapsed = current.duration_since(previous).ok()?.as_secs_f64();
    if elapsed > 0.0 { Some(elapsed) } else { None }
}

fn per_second(delta: u64, elapsed: f64) -> f64 {
    delta as f64 / elapsed
}

/// Derive per-second rates from two consecutive snapshots. With no
/// previous snapshot, a clock anomaly, or a counter section absent on
/// either side, the affected rates are unavailable. Every produced value
/// is finite and non-negative.
pub fn derive(previous: Option<&RawSnapshot>, current: &RawSnapshot) -> RateSnapshot {
    let Some(previous) = previous else {
        return RateSnapshot::default();
    };
    let Some(elapsed) = elapsed_secs(previous.timestamp, current.timestamp) else {
        return RateSnapshot::default();
    };

    let net = previous.net_io.zip(current.net_io);
    let disk = previous.disk_io.zip(current.disk_io);

    RateSnapshot {
        send_bytes_per_sec: net
            .map(|(p, c)| per_second(counter_delta(p.bytes_sent, c.bytes_sent), elapsed)),
        recv_bytes_per_sec: net
            .map(|(p, c)| per_second(counter_delta(p.bytes_recv, c.bytes_recv), elapsed)),
        send_packets_per_sec: net
            .map(|(p, c)| per_second(counter_delta(p.packets_sent, c.packets_sent), elapsed)),
        recv_packets_per_sec: net
            .map(|(p, c)| per_second(counter_delta(p.packets_recv, c.packets_recv), elapsed)),
        disk_read_bytes_per_sec: disk
            .map(|(p, c)| per_second(counter_delta(p.read_bytes, c.read_bytes), elapsed)),
        disk_write_bytes_per_sec: disk
            .map(|(p, c)| per_second(counter_delta(p.write_bytes, c.write_bytes), elapsed)),
    }
}
