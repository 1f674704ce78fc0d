// Snapshot assembly tests: severity mapping, missing sections, idempotence

mod common;

use std::time::SystemTime;

use common::{connection, cpu_sample, degraded_snapshot, process, raw_snapshot};
use sysdash::config::SortKey;
use sysdash::models::{RankedConnectionView, RankedProcessView, RateSnapshot, Section};
use sysdash::ranking::{rank_connections, rank_processes};
use sysdash::severity::Severity;
use sysdash::snapshot::assemble;

fn ranked(raw: &sysdash::models::RawSnapshot) -> (Option<RankedProcessView>, Option<RankedConnectionView>) {
    let processes = raw
        .processes
        .as_ref()
        .map(|p| rank_processes(p, SortKey::Cpu, 10, None));
    let connections = raw.connections.as_ref().map(|c| rank_connections(c, 10));
    (processes, connections)
}

#[test]
fn assembly_is_idempotent() {
    let raw = raw_snapshot(SystemTime::UNIX_EPOCH, 5_000, 5_000);
    let rates = RateSnapshot::default();
    let (processes, connections) = ranked(&raw);

    let first = assemble(&raw, rates, processes.clone(), connections.clone());
    let second = assemble(&raw, rates, processes, connections);

    assert_eq!(first, second);
}

#[test]
fn severities_follow_the_percent_values() {
    let mut raw = raw_snapshot(SystemTime::UNIX_EPOCH, 1_000, 1_000);
    let mut cpu = cpu_sample(85.0);
    cpu.per_core_percent = vec![10.0, 65.0, 95.0];
    raw.cpu = Some(cpu);
    let (processes, connections) = ranked(&raw);

    let snapshot = assemble(&raw, RateSnapshot::default(), processes, connections);

    let cpu = snapshot.cpu.expect("cpu view");
    assert_eq!(cpu.severity, Severity::Critical);
    let core_tiers: Vec<Severity> = cpu.per_core.iter().map(|c| c.severity).collect();
    assert_eq!(
        core_tiers,
        vec![Severity::Normal, Severity::Moderate, Severity::Critical]
    );

    let memory = snapshot.memory.expect("memory view");
    assert_eq!(memory.severity, Severity::Normal);

    let disks = snapshot.disks.expect("disk views");
    assert_eq!(disks[0].severity, Severity::Normal);
}

#[test]
fn process_rows_carry_cpu_and_memory_severities() {
    let raw = raw_snapshot(SystemTime::UNIX_EPOCH, 1_000, 1_000);
    let processes = Some(rank_processes(
        &[process(9, "hog", 92.0, 1024)],
        SortKey::Cpu,
        10,
        None,
    ));

    let snapshot = assemble(&raw, RateSnapshot::default(), processes, None);

    let table = snapshot.processes.expect("process table");
    assert_eq!(table.sort_key, SortKey::Cpu);
    assert_eq!(table.rows[0].cpu_severity, Severity::Critical);
    assert_eq!(table.rows[0].memory_severity, Severity::Normal);
}

#[test]
fn connection_count_reflects_the_full_list_not_the_display_limit() {
    let mut raw = raw_snapshot(SystemTime::UNIX_EPOCH, 1_000, 1_000);
    raw.connections = Some(vec![
        connection("10.0.0.1:1", "ESTABLISHED"),
        connection("10.0.0.1:2", "ESTABLISHED"),
        connection("10.0.0.1:3", "ESTABLISHED"),
    ]);
    let connections = raw.connections.as_ref().map(|c| rank_connections(c, 1));

    let snapshot = assemble(&raw, RateSnapshot::default(), None, connections);

    let network = snapshot.network.expect("network view");
    assert_eq!(network.connection_count, Some(3));
    assert_eq!(snapshot.connections.expect("connections").entries.len(), 1);
}

#[test]
fn missing_sections_stay_missing_with_their_reasons() {
    let raw = degraded_snapshot(SystemTime::UNIX_EPOCH, Section::Memory, "read failed");
    let (processes, connections) = ranked(&raw);

    let snapshot = assemble(&raw, RateSnapshot::default(), processes, connections);

    assert!(snapshot.memory.is_none());
    assert_eq!(snapshot.degradation(Section::Memory), Some("read failed"));
    assert_eq!(snapshot.degradation(Section::Cpu), None);
    assert!(snapshot.cpu.is_some());
}

#[test]
fn rates_pass_through_untouched() {
    let raw = raw_snapshot(SystemTime::UNIX_EPOCH, 1_000, 1_000);
    let rates = RateSnapshot {
        send_bytes_per_sec: Some(1_024.0),
        recv_bytes_per_sec: None,
        ..RateSnapshot::default()
    };

    let snapshot = assemble(&raw, rates, None, None);

    assert_eq!(snapshot.rates.send_bytes_per_sec, Some(1_024.0));
    assert_eq!(snapshot.rates.recv_bytes_per_sec, None);
}
