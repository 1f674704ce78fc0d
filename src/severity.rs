// Severity classification for percentage metrics. Thresholds live in a
// data table keyed by metric class, not in branching code.

/// What kind of percentage a value is, for threshold lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricClass {
    Cpu,
    Memory,
    Disk,
}

/// Display tier for a classified value (maps to green/yellow/red).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Moderate,
    Critical,
}

/// Tier boundaries for one metric class. Half-open intervals: a value
/// equal to a boundary belongs to the higher tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub moderate: f64,
    pub critical: f64,
}

/// The threshold table. CPU and memory share boundaries; disk warns earlier.
const THRESHOLD_TABLE: &[(MetricClass, Thresholds)] = &[
    (
        MetricClass::Cpu,
        Thresholds {
            moderate: 50.0,
            critical: 80.0,
        },
    ),
    (
        MetricClass::Memory,
        Thresholds {
            moderate: 50.0,
            critical: 80.0,
        },
    ),
    (
        MetricClass::Disk,
        Thresholds {
            moderate: 60.0,
            critical: 80.0,
        },
    ),
];

/// Boundaries for a metric class, straight from the table.
pub fn thresholds(class: MetricClass) -> Thresholds {
    // The table covers every MetricClass variant, so the fallback never fires.
    THRESHOLD_TABLE
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, t)| *t)
        .unwrap_or(Thresholds {
            moderate: 50.0,
            critical: 80.0,
        })
}

/// Classify a percentage into a severity tier. Out-of-range inputs are
/// clamped to [0, 100] first, so 150.0 classifies exactly like 100.0.
pub fn classify(class: MetricClass, value: f64) -> Severity {
    let value = value.clamp(0.0, 100.0);
    let t = thresholds(class);
    if value >= t.critical {
        Severity::Critical
    } else if value >= t.moderate {
        Severity::Moderate
    } else {
        Severity::Normal
    }
}
