// Ranking and filtering of provider entity lists for display. Filtering
// happens before ranking, truncation after, so the limit applies to the
// best-ranked matches rather than an arbitrary prefix.

use crate::config::SortKey;
use crate::models::{ConnectionSample, ProcessSample, RankedConnectionView, RankedProcessView};

/// Filter by case-insensitive substring on the process name, sort
/// descending by the chosen key with ties broken by ascending pid, then
/// keep the first `limit` entries. A zero limit yields an empty view.
pub fn rank_processes(
    processes: &[ProcessSample],
    sort_key: SortKey,
    limit: usize,
    name_filter: Option<&str>,
) -> RankedProcessView {
    let needle = name_filter.map(str::to_lowercase);
    let mut entries: Vec<ProcessSample> = processes
        .iter()
        .filter(|p| match &needle {
            Some(needle) => p.name.to_lowercase().contains(needle),
            None => true,
        })
        .cloned()
        .collect();
    let matching = entries.len();

    match sort_key {
        SortKey::Cpu => entries.sort_by(|a, b| {
            b.cpu_percent
                .total_cmp(&a.cpu_percent)
                .then_with(|| a.pid.cmp(&b.pid))
        }),
        SortKey::Memory => entries.sort_by(|a, b| {
            b.memory_bytes
                .cmp(&a.memory_bytes)
                .then_with(|| a.pid.cmp(&b.pid))
        }),
    }
    entries.truncate(limit);

    RankedProcessView {
        entries,
        sort_key,
        matching,
    }
}

/// Keep the first `limit` connections in provider order; no re-sort.
pub fn rank_connections(connections: &[ConnectionSample], limit: usize) -> RankedConnectionView {
    RankedConnectionView {
        entries: connections.iter().take(limit).cloned().collect(),
        total: connections.len(),
    }
}
