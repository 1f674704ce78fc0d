// Metrics provider: the boundary between the engine and the OS. Each read
// is an independent, side-effect-free sub-read so the scheduler can overlap
// them and degrade one section without losing the rest.

mod linux;

use std::future::Future;
use std::sync::Arc;

use sysinfo::{Disks, Networks, ProcessesToUpdate, System};
use thiserror::Error;
use tracing::instrument;

use crate::models::{
    ConnectionSample, CpuSample, DiskIoCounters, MemorySample, NetIoCounters, PartitionUsage,
    ProcessSample,
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: lock poisoned")]
    Poisoned { context: &'static str },
    #[error("{context}: sampling task failed")]
    Join { context: &'static str },
}

/// One sub-read per monitored subsystem. Every call may fail on its own;
/// the caller decides whether to degrade or abort.
pub trait MetricsProvider {
    fn read_cpu(&self) -> impl Future<Output = Result<CpuSample, ProviderError>> + Send;
    fn read_memory(&self) -> impl Future<Output = Result<MemorySample, ProviderError>> + Send;
    fn read_disks(&self) -> impl Future<Output = Result<Vec<PartitionUsage>, ProviderError>> + Send;
    fn read_disk_io(&self) -> impl Future<Output = Result<DiskIoCounters, ProviderError>> + Send;
    fn read_network_io(&self) -> impl Future<Output = Result<NetIoCounters, ProviderError>> + Send;
    fn read_processes(&self)
    -> impl Future<Output = Result<Vec<ProcessSample>, ProviderError>> + Send;
    fn read_connections(&self)
    -> impl Future<Output = Result<Vec<ConnectionSample>, ProviderError>> + Send;
}

/// Production provider: `sysinfo` for everything it covers, `/proc` for
/// the connection table and interface drop counters it does not. The
/// sysinfo handles sit behind mutexes and every read runs on the blocking
/// pool, since sysinfo refreshes touch the filesystem.
pub struct SysinfoProvider {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
        }
    }
}

impl MetricsProvider for SysinfoProvider {
    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_cpu"))]
    async fn read_cpu(&self) -> Result<CpuSample, ProviderError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "cpu" })?;
            sys.refresh_cpu_all();
            let load = System::load_average();
            Ok(CpuSample {
                overall_percent: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                per_core_percent: sys.cpus().iter().map(|c| c.cpu_usage() as f64).collect(),
                logical_cores: sys.cpus().len(),
                frequency_mhz: sys.cpus().first().map(|c| c.frequency()).unwrap_or(0),
                load_avg: [load.one, load.five, load.fifteen],
            })
        })
        .await
        .map_err(|_| ProviderError::Join { context: "cpu" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_memory"))]
    async fn read_memory(&self) -> Result<MemorySample, ProviderError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "memory" })?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let available = sys.available_memory();
            let used = total.saturating_sub(available);
            let swap_total = sys.total_swap();
            let swap_used = sys.used_swap();

            Ok(MemorySample {
                total,
                used,
                available,
                percent: percent_of(used, total),
                swap_total,
                swap_used,
                swap_percent: percent_of(swap_used, swap_total),
            })
        })
        .await
        .map_err(|_| ProviderError::Join { context: "memory" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_disks"))]
    async fn read_disks(&self) -> Result<Vec<PartitionUsage>, ProviderError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "disks" })?;
            disks.refresh(false);
            Ok(disks
                .list()
                .iter()
                .map(|d| {
                    let total = d.total_space();
                    let available = d.available_space();
                    let used = total.saturating_sub(available);
                    PartitionUsage {
                        mount: d.mount_point().to_string_lossy().into_owned(),
                        device: d.name().to_string_lossy().into_owned(),
                        fs_type: d.file_system().to_string_lossy().into_owned(),
                        total,
                        used,
                        available,
                        percent: percent_of(used, total),
                    }
                })
                .collect())
        })
        .await
        .map_err(|_| ProviderError::Join { context: "disks" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_disk_io"))]
    async fn read_disk_io(&self) -> Result<DiskIoCounters, ProviderError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "disk_io" })?;
            disks.refresh(false);
            let mut counters = DiskIoCounters::default();
            for d in disks.list() {
                let usage = d.usage();
                counters.read_bytes += usage.total_read_bytes;
                counters.write_bytes += usage.total_written_bytes;
            }
            Ok(counters)
        })
        .await
        .map_err(|_| ProviderError::Join { context: "disk_io" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_network_io"))]
    async fn read_network_io(&self) -> Result<NetIoCounters, ProviderError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks = networks
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "network" })?;
            networks.refresh(true);

            let mut counters = NetIoCounters::default();
            for (_, data) in networks.list() {
                counters.bytes_sent += data.total_transmitted();
                counters.bytes_recv += data.total_received();
                counters.packets_sent += data.total_packets_transmitted();
                counters.packets_recv += data.total_packets_received();
                counters.errors_in += data.total_errors_on_received();
                counters.errors_out += data.total_errors_on_transmitted();
            }
            // sysinfo has no drop counters; /proc/net/dev does.
            if let Some((drops_in, drops_out)) = linux::read_net_drop_totals() {
                counters.drops_in = drops_in;
                counters.drops_out = drops_out;
            }
            Ok(counters)
        })
        .await
        .map_err(|_| ProviderError::Join { context: "network" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_processes"))]
    async fn read_processes(&self) -> Result<Vec<ProcessSample>, ProviderError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|_| ProviderError::Poisoned { context: "processes" })?;
            sys.refresh_processes(ProcessesToUpdate::All, true);

            let total_memory = sys.total_memory();
            Ok(sys
                .processes()
                .values()
                .map(|p| ProcessSample {
                    pid: p.pid().as_u32(),
                    name: p.name().to_string_lossy().into_owned(),
                    cpu_percent: p.cpu_usage() as f64,
                    memory_bytes: p.memory(),
                    memory_percent: percent_of(p.memory(), total_memory),
                    cpu_time_ms: p.accumulated_cpu_time(),
                    thread_count: (1 + p.tasks().map(|t| t.len()).unwrap_or(0)) as u32,
                    status: p.status().to_string(),
                })
                .collect())
        })
        .await
        .map_err(|_| ProviderError::Join { context: "processes" })?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "read_connections"))]
    async fn read_connections(&self) -> Result<Vec<ConnectionSample>, ProviderError> {
        tokio::task::spawn_blocking(linux::read_connection_table)
            .await
            .map_err(|_| ProviderError::Join {
                context: "connections",
            })?
    }
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}
