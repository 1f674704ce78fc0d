// Command-line surface. Parsing stays here; semantic validation lives in
// config::MonitorConfig so the loop never re-checks flags.

use clap::Parser;

use crate::config::SortKey;

#[derive(Parser, Debug)]
#[command(
    name = "sysdash",
    version,
    about = "Real-time terminal dashboard for CPU, memory, disk, network, and processes"
)]
pub struct Cli {
    /// Refresh interval in seconds
    #[arg(short = 'r', long = "refresh", default_value_t = 1.0)]
    pub refresh: f64,

    /// Process table sort key
    #[arg(short = 's', long = "sort", value_enum, default_value_t = SortKey::Cpu)]
    pub sort: SortKey,

    /// Number of processes to display
    #[arg(short = 'p', long = "processes", default_value_t = 10)]
    pub processes: usize,

    /// Number of connections to display
    #[arg(short = 'c', long = "connections", default_value_t = 10)]
    pub connections: usize,

    /// Only show processes whose name contains this substring (case-insensitive)
    #[arg(short = 'f', long = "filter")]
    pub filter: Option<String>,
}
