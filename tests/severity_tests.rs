// Severity classification tests: per-class thresholds and boundary behavior

use sysdash::severity::{MetricClass, Severity, classify, thresholds};

#[test]
fn cpu_boundaries_are_half_open_upward() {
    assert_eq!(classify(MetricClass::Cpu, 49.9), Severity::Normal);
    assert_eq!(classify(MetricClass::Cpu, 50.0), Severity::Moderate);
    assert_eq!(classify(MetricClass::Cpu, 79.9), Severity::Moderate);
    assert_eq!(classify(MetricClass::Cpu, 80.0), Severity::Critical);
}

#[test]
fn memory_uses_the_same_boundaries_as_cpu() {
    assert_eq!(classify(MetricClass::Memory, 49.9), Severity::Normal);
    assert_eq!(classify(MetricClass::Memory, 50.0), Severity::Moderate);
    assert_eq!(classify(MetricClass::Memory, 80.0), Severity::Critical);
}

#[test]
fn disk_moderate_starts_lower() {
    assert_eq!(classify(MetricClass::Disk, 59.9), Severity::Normal);
    assert_eq!(classify(MetricClass::Disk, 60.0), Severity::Moderate);
    assert_eq!(classify(MetricClass::Disk, 79.9), Severity::Moderate);
    assert_eq!(classify(MetricClass::Disk, 80.0), Severity::Critical);
}

#[test]
fn out_of_range_values_clamp_before_classification() {
    assert_eq!(classify(MetricClass::Cpu, -5.0), Severity::Normal);
    assert_eq!(classify(MetricClass::Cpu, 150.0), Severity::Critical);
    assert_eq!(classify(MetricClass::Disk, f64::NAN), Severity::Normal);
}

#[test]
fn threshold_table_matches_classification() {
    for class in [MetricClass::Cpu, MetricClass::Memory, MetricClass::Disk] {
        let t = thresholds(class);
        assert_eq!(classify(class, t.moderate), Severity::Moderate);
        assert_eq!(classify(class, t.critical), Severity::Critical);
        assert_eq!(classify(class, t.moderate - 0.1), Severity::Normal);
    }
}
