// Runtime configuration, resolved once at startup from the CLI and
// validated before any terminal state is touched. The scheduler trusts it
// and never re-validates.

use std::time::Duration;

use clap::ValueEnum;

use crate::cli::Cli;

/// Process table ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Instantaneous CPU percent, descending.
    Cpu,
    /// Resident memory bytes, descending.
    Memory,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Cpu => write!(f, "cpu"),
            SortKey::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub refresh_interval_secs: f64,
    pub sort_key: SortKey,
    pub process_limit: usize,
    pub connection_limit: usize,
    /// Case-insensitive substring filter on process names; empty strings
    /// from the CLI are normalized to no filter.
    pub name_filter: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            refresh_interval_secs: 1.0,
            sort_key: SortKey::Cpu,
            process_limit: 10,
            connection_limit: 10,
            name_filter: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let config = MonitorConfig {
            refresh_interval_secs: cli.refresh,
            sort_key: cli.sort,
            process_limit: cli.processes,
            connection_limit: cli.connections,
            name_filter: cli.filter.filter(|f| !f.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(self.refresh_interval_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.refresh_interval_secs.is_finite(),
            "refresh interval must be a finite number of seconds, got {}",
            self.refresh_interval_secs
        );
        // from_secs_f64 rounds tiny values to a zero Duration, which
        // tokio's interval panics on.
        anyhow::ensure!(
            self.refresh_interval_secs >= 0.001,
            "refresh interval must be at least 0.001 seconds, got {}",
            self.refresh_interval_secs
        );
        anyhow::ensure!(
            self.refresh_interval_secs <= 86_400.0,
            "refresh interval must be at most 86400 seconds, got {}",
            self.refresh_interval_secs
        );
        Ok(())
    }
}
