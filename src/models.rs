// Domain models: raw provider reads, derived rates, ranked views, and the
// assembled snapshot handed to the renderer.

use std::time::SystemTime;

use crate::config::SortKey;
use crate::severity::Severity;

/// Point-in-time CPU reading.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub overall_percent: f64,
    pub per_core_percent: Vec<f64>,
    pub logical_cores: usize,
    /// Current frequency of the first core in MHz, 0 when unknown.
    pub frequency_mhz: u64,
    /// 1/5/15-minute load averages.
    pub load_avg: [f64; 3],
}

/// Point-in-time memory and swap reading, sizes in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySample {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

/// Usage of one mounted filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionUsage {
    pub mount: String,
    pub device: String,
    pub fs_type: String,
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f64,
}

/// Cumulative disk I/O counters summed across disks. Non-decreasing over
/// the life of the host barring counter resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Cumulative network counters summed across interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetIoCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    pub drops_in: u64,
    pub drops_out: u64,
}

/// One process as enumerated by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// Instantaneous CPU percent; may exceed 100 on multi-core hosts.
    pub cpu_percent: f64,
    pub memory_bytes: u64,
    pub memory_percent: f64,
    /// Cumulative CPU time in milliseconds.
    pub cpu_time_ms: u64,
    pub thread_count: u32,
    pub status: String,
}

/// Transport protocol of a socket entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnProtocol {
    Tcp,
    Udp,
}

impl std::fmt::Display for ConnProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnProtocol::Tcp => write!(f, "tcp"),
            ConnProtocol::Udp => write!(f, "udp"),
        }
    }
}

/// One socket as enumerated by the provider, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSample {
    pub protocol: ConnProtocol,
    pub local_addr: String,
    /// Absent for listening and unconnected sockets.
    pub remote_addr: Option<String>,
    /// Kernel state name, e.g. "ESTABLISHED" or "LISTEN"; "-" for UDP.
    pub status: String,
    /// Owning process, when the socket inode could be resolved.
    pub pid: Option<u32>,
}

/// Dashboard section a degradation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Cpu,
    Memory,
    Disks,
    DiskIo,
    Network,
    Processes,
    Connections,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Cpu => "cpu",
            Section::Memory => "memory",
            Section::Disks => "disks",
            Section::DiskIo => "disk_io",
            Section::Network => "network",
            Section::Processes => "processes",
            Section::Connections => "connections",
        };
        write!(f, "{name}")
    }
}

/// A sub-read that failed this tick. The affected panel shows the reason
/// instead of stale or zeroed data.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradation {
    pub section: Section,
    pub reason: String,
}

/// One full point-in-time read of every monitored subsystem. A `None`
/// section means that sub-read failed this tick (see `degraded`), which is
/// distinct from a present-but-empty reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot {
    pub timestamp: SystemTime,
    pub cpu: Option<CpuSample>,
    pub memory: Option<MemorySample>,
    pub partitions: Option<Vec<PartitionUsage>>,
    pub disk_io: Option<DiskIoCounters>,
    pub net_io: Option<NetIoCounters>,
    pub processes: Option<Vec<ProcessSample>>,
    pub connections: Option<Vec<ConnectionSample>>,
    pub degraded: Vec<Degradation>,
}

/// Time-normalized rates derived from two consecutive raw snapshots.
/// `None` means unavailable (no previous snapshot, clock anomaly, or a
/// missing counter section) and is never conflated with a measured zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateSnapshot {
    pub send_bytes_per_sec: Option<f64>,
    pub recv_bytes_per_sec: Option<f64>,
    pub send_packets_per_sec: Option<f64>,
    pub recv_packets_per_sec: Option<f64>,
    pub disk_read_bytes_per_sec: Option<f64>,
    pub disk_write_bytes_per_sec: Option<f64>,
}

/// Processes filtered, sorted, and truncated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProcessView {
    pub entries: Vec<ProcessSample>,
    pub sort_key: SortKey,
    /// Count after filtering but before truncation.
    pub matching: usize,
}

/// Connections truncated for display, provider order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedConnectionView {
    pub entries: Vec<ConnectionSample>,
    /// Count before truncation.
    pub total: usize,
}

/// CPU panel data with severities resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuView {
    pub overall_percent: f64,
    pub severity: Severity,
    pub per_core: Vec<CoreLoad>,
    pub logical_cores: usize,
    pub frequency_mhz: u64,
    pub load_avg: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreLoad {
    pub percent: f64,
    pub severity: Severity,
}

/// Memory panel data with severities resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryView {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f64,
    pub severity: Severity,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
    pub swap_severity: Severity,
}

/// One disk table row with severity resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionView {
    pub usage: PartitionUsage,
    pub severity: Severity,
}

/// Network panel data. `connection_count` is the pre-truncation total, so
/// it reflects the host rather than the display limit.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkView {
    pub totals: NetIoCounters,
    pub connection_count: Option<usize>,
}

/// One process table row with severities resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub entry: ProcessSample,
    pub cpu_severity: Severity,
    pub memory_severity: Severity,
}

/// Process table with severities resolved, plus the sort key and the
/// pre-truncation match count for the panel title.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTableView {
    pub rows: Vec<ProcessRow>,
    pub sort_key: SortKey,
    pub matching: usize,
}

/// Everything the renderer needs for one frame. Built fresh each tick,
/// immutable afterwards, discarded after drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    pub taken_at: SystemTime,
    pub cpu: Option<CpuView>,
    pub memory: Option<MemoryView>,
    pub disks: Option<Vec<PartitionView>>,
    pub network: Option<NetworkView>,
    pub rates: RateSnapshot,
    pub processes: Option<ProcessTableView>,
    pub connections: Option<RankedConnectionView>,
    pub degraded: Vec<Degradation>,
}

impl DisplaySnapshot {
    /// Reason text for a section, when that section is degraded.
    pub fn degradation(&self, section: Section) -> Option<&str> {
        self.degraded
            .iter()
            .find(|d| d.section == section)
            .map(|d| d.reason.as_str())
    }
}
