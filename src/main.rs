use std::fs::OpenOptions;

use anyhow::Result;
use clap::Parser;
use sysdash::cli::Cli;
use sysdash::config::MonitorConfig;
use sysdash::input;
use sysdash::provider::SysinfoProvider;
use sysdash::scheduler::Scheduler;
use sysdash::ui::TerminalUi;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

// The dashboard owns the terminal, so logs go to the file named by
// SYSDASH_LOG. Without it logging stays off.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("SYSDASH_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    // Validate before the terminal switches to the alternate screen so
    // errors land on a usable stderr.
    let config = MonitorConfig::from_cli(cli)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        refresh_secs = config.refresh_interval_secs,
        sort_key = %config.sort_key,
        "Starting dashboard"
    );

    let provider = SysinfoProvider::new();
    let ui = TerminalUi::new()?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let (scheduler, _phase_rx) = Scheduler::new(provider, ui, config, shutdown_rx);
    let mut loop_handle = scheduler.spawn();
    let mut quit_rx = input::spawn_quit_listener();

    tokio::select! {
        result = &mut loop_handle => {
            return flatten(result);
        }
        _ = quit_rx.recv() => {
            tracing::info!("Quit key pressed");
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    flatten(loop_handle.await)
}

fn flatten(joined: Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(anyhow::anyhow!("sampling loop panicked: {e}")),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
