// Scheduler loop: drives the sample -> derive -> rank -> assemble ->
// render cycle on a fixed cadence and owns the sample store. One tick runs
// to completion before the next begins; sub-reads overlap inside a tick.

use std::time::SystemTime;

use tokio::sync::{oneshot, watch};
use tokio::time::{MissedTickBehavior, interval};

use crate::config::MonitorConfig;
use crate::models::{Degradation, RawSnapshot, Section};
use crate::provider::{MetricsProvider, ProviderError};
use crate::store::SampleStore;
use crate::ui::Renderer;
use crate::{ranking, rates, snapshot};

/// Where the loop currently is, published on a watch channel. `Sleeping`
/// covers the wait between ticks; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sampling,
    Assembling,
    Rendering,
    Sleeping,
    Stopped,
}

pub struct Scheduler<P, R> {
    provider: P,
    renderer: R,
    config: MonitorConfig,
    store: SampleStore,
    phase_tx: watch::Sender<Phase>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl<P, R> Scheduler<P, R>
where
    P: MetricsProvider + Send + Sync + 'static,
    R: Renderer + Send + 'static,
{
    pub fn new(
        provider: P,
        renderer: R,
        config: MonitorConfig,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> (Self, watch::Receiver<Phase>) {
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let scheduler = Scheduler {
            provider,
            renderer,
            config,
            store: SampleStore::new(),
            phase_tx,
            shutdown_rx,
        };
        (scheduler, phase_rx)
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let Scheduler {
            provider,
            mut renderer,
            config,
            mut store,
            phase_tx,
            mut shutdown_rx,
        } = self;

        // Ticks stay on the interval grid; a slow tick skips missed slots
        // instead of bursting, so phase drift never exceeds one interval.
        let mut tick = interval(config.refresh_interval());
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // Shutdown beats a tick that became ready in the same poll.
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                _ = tick.tick() => {}
            }

            let _ = phase_tx.send(Phase::Sampling);
            let raw = sample(&provider).await;
            if shutdown_requested(&mut shutdown_rx) {
                break;
            }

            let _ = phase_tx.send(Phase::Assembling);
            let (previous, current) = store.push(raw);
            let rates = rates::derive(previous, current);
            let processes = current.processes.as_ref().map(|list| {
                ranking::rank_processes(
                    list,
                    config.sort_key,
                    config.process_limit,
                    config.name_filter.as_deref(),
                )
            });
            let connections = current
                .connections
                .as_ref()
                .map(|list| ranking::rank_connections(list, config.connection_limit));
            let display = snapshot::assemble(current, rates, processes, connections);
            if shutdown_requested(&mut shutdown_rx) {
                break;
            }

            let _ = phase_tx.send(Phase::Rendering);
            if let Err(e) = renderer.render(&display) {
                let _ = phase_tx.send(Phase::Stopped);
                tracing::error!(error = %e, operation = "render", "renderer failed, stopping");
                return Err(e);
            }

            let _ = phase_tx.send(Phase::Sleeping);
        }

        let _ = phase_tx.send(Phase::Stopped);
        tracing::debug!("Scheduler stopped");
        Ok(())
    }
}

/// One full sampling pass: the seven sub-reads run concurrently and the
/// pass waits for all of them. A failed sub-read leaves its section absent
/// and records the reason; it never aborts the tick.
async fn sample<P: MetricsProvider>(provider: &P) -> RawSnapshot {
    let timestamp = SystemTime::now();
    let (cpu, memory, partitions, disk_io, net_io, processes, connections) = tokio::join!(
        provider.read_cpu(),
        provider.read_memory(),
        provider.read_disks(),
        provider.read_disk_io(),
        provider.read_network_io(),
        provider.read_processes(),
        provider.read_connections(),
    );

    let mut degraded = Vec::new();
    RawSnapshot {
        timestamp,
        cpu: ok_or_degrade(cpu, Section::Cpu, &mut degraded),
        memory: ok_or_degrade(memory, Section::Memory, &mut degraded),
        partitions: ok_or_degrade(partitions, Section::Disks, &mut degraded),
        disk_io: ok_or_degrade(disk_io, Section::DiskIo, &mut degraded),
        net_io: ok_or_degrade(net_io, Section::Network, &mut degraded),
        processes: ok_or_degrade(processes, Section::Processes, &mut degraded),
        connections: ok_or_degrade(connections, Section::Connections, &mut degraded),
        degraded,
    }
}

fn ok_or_degrade<T>(
    result: Result<T, ProviderError>,
    section: Section,
    degraded: &mut Vec<Degradation>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                error = %e,
                operation = "sample",
                section = %section,
                "sub-read failed, degrading section"
            );
            degraded.push(Degradation {
                section,
                reason: e.to_string(),
            });
            None
        }
    }
}

/// A fired or dropped shutdown sender both mean stop; only a still-pending
/// channel keeps the loop running.
fn shutdown_requested(shutdown_rx: &mut oneshot::Receiver<()>) -> bool {
    !matches!(
        shutdown_rx.try_recv(),
        Err(oneshot::error::TryRecvError::Empty)
    )
}
