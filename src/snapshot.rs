// Snapshot assembly: folds one raw snapshot, its derived rates, and the
// ranked views into the immutable DisplaySnapshot handed to the renderer.
// Severity classification happens here and nowhere downstream.

use crate::models::{
    CoreLoad, CpuSample, CpuView, DisplaySnapshot, MemorySample, MemoryView, NetworkView,
    PartitionView, ProcessRow, ProcessSample, ProcessTableView, RankedConnectionView,
    RankedProcessView, RateSnapshot, RawSnapshot,
};
use crate::severity::{MetricClass, classify};

/// Pure composition: identical inputs produce field-for-field identical
/// snapshots. Sections absent from the raw snapshot stay absent; their
/// reasons travel in `degraded`.
pub fn assemble(
    raw: &RawSnapshot,
    rates: RateSnapshot,
    processes: Option<RankedProcessView>,
    connections: Option<RankedConnectionView>,
) -> DisplaySnapshot {
    DisplaySnapshot {
        taken_at: raw.timestamp,
        cpu: raw.cpu.as_ref().map(cpu_view),
        memory: raw.memory.as_ref().map(memory_view),
        disks: raw.partitions.as_ref().map(|partitions| {
            partitions
                .iter()
                .map(|usage| PartitionView {
                    usage: usage.clone(),
                    severity: classify(MetricClass::Disk, usage.percent),
                })
                .collect()
        }),
        network: raw.net_io.map(|totals| NetworkView {
            totals,
            connection_count: raw.connections.as_ref().map(Vec::len),
        }),
        rates,
        processes: processes.map(|view| ProcessTableView {
            rows: view.entries.into_iter().map(process_row).collect(),
            sort_key: view.sort_key,
            matching: view.matching,
        }),
        connections,
        degraded: raw.degraded.clone(),
    }
}

fn cpu_view(cpu: &CpuSample) -> CpuView {
    CpuView {
        overall_percent: cpu.overall_percent,
        severity: classify(MetricClass::Cpu, cpu.overall_percent),
        per_core: cpu
            .per_core_percent
            .iter()
            .map(|&percent| CoreLoad {
                percent,
                severity: classify(MetricClass::Cpu, percent),
            })
            .collect(),
        logical_cores: cpu.logical_cores,
        frequency_mhz: cpu.frequency_mhz,
        load_avg: cpu.load_avg,
    }
}

fn memory_view(memory: &MemorySample) -> MemoryView {
    MemoryView {
        total: memory.total,
        used: memory.used,
        available: memory.available,
        percent: memory.percent,
        severity: classify(MetricClass::Memory, memory.percent),
        swap_total: memory.swap_total,
        swap_used: memory.swap_used,
        swap_percent: memory.swap_percent,
        swap_severity: classify(MetricClass::Memory, memory.swap_percent),
    }
}

fn process_row(entry: ProcessSample) -> ProcessRow {
    let cpu_severity = classify(MetricClass::Cpu, entry.cpu_percent);
    let memory_severity = classify(MetricClass::Memory, entry.memory_percent);
    ProcessRow {
        entry,
        cpu_severity,
        memory_severity,
    }
}
