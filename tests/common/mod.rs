// Shared test helpers
#![allow(dead_code)]

use std::time::{Duration, SystemTime};

use sysdash::models::{
    ConnProtocol, ConnectionSample, CpuSample, Degradation, DiskIoCounters, MemorySample,
    NetIoCounters, PartitionUsage, ProcessSample, RawSnapshot, Section,
};

pub fn cpu_sample(overall_percent: f64) -> CpuSample {
    CpuSample {
        overall_percent,
        per_core_percent: vec![overall_percent; 2],
        logical_cores: 2,
        frequency_mhz: 2400,
        load_avg: [0.5, 0.4, 0.3],
    }
}

pub fn memory_sample(percent: f64) -> MemorySample {
    let total = 16 * 1024 * 1024 * 1024_u64;
    let used = (total as f64 * percent / 100.0) as u64;
    MemorySample {
        total,
        used,
        available: total - used,
        percent,
        swap_total: 2 * 1024 * 1024 * 1024,
        swap_used: 0,
        swap_percent: 0.0,
    }
}

pub fn partition(mount: &str, percent: f64) -> PartitionUsage {
    let total = 100 * 1024 * 1024 * 1024_u64;
    let used = (total as f64 * percent / 100.0) as u64;
    PartitionUsage {
        mount: mount.to_string(),
        device: "/dev/sda1".to_string(),
        fs_type: "ext4".to_string(),
        total,
        used,
        available: total - used,
        percent,
    }
}

pub fn process(pid: u32, name: &str, cpu_percent: f64, memory_bytes: u64) -> ProcessSample {
    ProcessSample {
        pid,
        name: name.to_string(),
        cpu_percent,
        memory_bytes,
        memory_percent: memory_bytes as f64 / (16.0 * 1024.0 * 1024.0 * 1024.0) * 100.0,
        cpu_time_ms: 1_000,
        thread_count: 4,
        status: "Runnable".to_string(),
    }
}

pub fn connection(local_addr: &str, status: &str) -> ConnectionSample {
    ConnectionSample {
        protocol: ConnProtocol::Tcp,
        local_addr: local_addr.to_string(),
        remote_addr: None,
        status: status.to_string(),
        pid: Some(1234),
    }
}

/// Fully healthy snapshot with the given counter totals.
pub fn raw_snapshot(
    timestamp: SystemTime,
    net_bytes_sent: u64,
    disk_read_bytes: u64,
) -> RawSnapshot {
    RawSnapshot {
        timestamp,
        cpu: Some(cpu_sample(12.5)),
        memory: Some(memory_sample(40.0)),
        partitions: Some(vec![partition("/", 55.0)]),
        disk_io: Some(DiskIoCounters {
            read_bytes: disk_read_bytes,
            write_bytes: disk_read_bytes / 2,
        }),
        net_io: Some(NetIoCounters {
            bytes_sent: net_bytes_sent,
            bytes_recv: net_bytes_sent * 2,
            packets_sent: net_bytes_sent / 100,
            packets_recv: net_bytes_sent / 50,
            errors_in: 0,
            errors_out: 0,
            drops_in: 0,
            drops_out: 0,
        }),
        processes: Some(vec![
            process(1, "init", 0.1, 8 * 1024 * 1024),
            process(42, "webserver", 25.0, 512 * 1024 * 1024),
        ]),
        connections: Some(vec![connection("0.0.0.0:80", "LISTEN")]),
        degraded: Vec::new(),
    }
}

/// Snapshot with one section missing and its degradation recorded.
pub fn degraded_snapshot(timestamp: SystemTime, section: Section, reason: &str) -> RawSnapshot {
    let mut raw = raw_snapshot(timestamp, 1_000, 1_000);
    match section {
        Section::Cpu => raw.cpu = None,
        Section::Memory => raw.memory = None,
        Section::Disks => raw.partitions = None,
        Section::DiskIo => raw.disk_io = None,
        Section::Network => raw.net_io = None,
        Section::Processes => raw.processes = None,
        Section::Connections => raw.connections = None,
    }
    raw.degraded.push(Degradation {
        section,
        reason: reason.to_string(),
    });
    raw
}

pub fn seconds_after(base: SystemTime, secs: u64) -> SystemTime {
    base + Duration::from_secs(secs)
}
