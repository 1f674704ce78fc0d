// CLI parsing and config validation tests

use clap::Parser;
use sysdash::cli::Cli;
use sysdash::config::{MonitorConfig, SortKey};

fn config_from(args: &[&str]) -> anyhow::Result<MonitorConfig> {
    let cli = Cli::try_parse_from(args).expect("args should parse");
    MonitorConfig::from_cli(cli)
}

#[test]
fn test_config_defaults() {
    let config = config_from(&["sysdash"]).expect("defaults are valid");
    assert_eq!(config, MonitorConfig::default());
    assert_eq!(config.refresh_interval_secs, 1.0);
    assert_eq!(config.sort_key, SortKey::Cpu);
    assert_eq!(config.process_limit, 10);
    assert_eq!(config.connection_limit, 10);
    assert_eq!(config.name_filter, None);
}

#[test]
fn test_config_parses_all_flags() {
    let config = config_from(&[
        "sysdash", "--refresh", "0.5", "--sort", "memory", "--processes", "25", "--connections",
        "5", "--filter", "nginx",
    ])
    .expect("valid flags");

    assert_eq!(config.refresh_interval_secs, 0.5);
    assert_eq!(config.sort_key, SortKey::Memory);
    assert_eq!(config.process_limit, 25);
    assert_eq!(config.connection_limit, 5);
    assert_eq!(config.name_filter.as_deref(), Some("nginx"));
}

#[test]
fn test_config_accepts_short_flags() {
    let config = config_from(&["sysdash", "-r", "2", "-s", "memory", "-p", "3", "-c", "0"])
        .expect("valid short flags");

    assert_eq!(config.refresh_interval_secs, 2.0);
    assert_eq!(config.sort_key, SortKey::Memory);
    assert_eq!(config.process_limit, 3);
    assert_eq!(config.connection_limit, 0);
}

#[test]
fn test_config_rejects_zero_refresh() {
    let err = config_from(&["sysdash", "--refresh", "0"]).unwrap_err();
    assert!(err.to_string().contains("refresh interval"));
}

#[test]
fn test_config_rejects_negative_refresh() {
    let err = config_from(&["sysdash", "--refresh=-1.5"]).unwrap_err();
    assert!(err.to_string().contains("refresh interval"));
}

#[test]
fn test_config_rejects_non_finite_refresh() {
    let err = config_from(&["sysdash", "--refresh", "inf"]).unwrap_err();
    assert!(err.to_string().contains("finite"));

    let err = config_from(&["sysdash", "--refresh", "NaN"]).unwrap_err();
    assert!(err.to_string().contains("finite"));
}

#[test]
fn test_config_rejects_oversized_refresh() {
    let err = config_from(&["sysdash", "--refresh", "1e9"]).unwrap_err();
    assert!(err.to_string().contains("86400"));
}

#[test]
fn test_config_rejects_sub_millisecond_refresh() {
    // 1e-10 seconds rounds to a zero Duration, which must never reach the
    // tick interval.
    let err = config_from(&["sysdash", "--refresh", "1e-10"]).unwrap_err();
    assert!(err.to_string().contains("at least 0.001"));
}

#[test]
fn test_config_accepts_the_millisecond_floor() {
    let config = config_from(&["sysdash", "--refresh", "0.001"]).expect("floor value is valid");
    assert_eq!(
        config.refresh_interval(),
        std::time::Duration::from_millis(1)
    );
}

#[test]
fn test_config_normalizes_empty_filter_to_none() {
    let config = config_from(&["sysdash", "--filter", ""]).expect("empty filter is valid");
    assert_eq!(config.name_filter, None);
}

#[test]
fn test_config_rejects_unknown_sort_key() {
    let result = Cli::try_parse_from(["sysdash", "--sort", "pid"]);
    assert!(result.is_err());
}

#[test]
fn test_refresh_interval_round_trips_to_duration() {
    let config = config_from(&["sysdash", "--refresh", "0.25"]).expect("valid");
    assert_eq!(config.refresh_interval(), std::time::Duration::from_millis(250));
}
