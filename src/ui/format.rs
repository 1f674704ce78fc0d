// Text formatting helpers shared by the dashboard panels.

const BAR_WIDTH: usize = 20;

/// Humanizes a byte count through the 1024 ladder, two decimals.
pub(super) fn format_bytes(bytes: u64) -> String {
    human_bytes(bytes as f64)
}

fn human_bytes(mut value: f64) -> String {
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Byte throughput, or "n/a" when the rate could not be derived. An
/// unavailable rate is never shown as a zero rate.
pub(super) fn format_byte_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{}/s", human_bytes(rate)),
        None => "n/a".to_string(),
    }
}

/// Plain per-second rate for packet counters, or "n/a".
pub(super) fn format_count_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate:.1}/s"),
        None => "n/a".to_string(),
    }
}

/// Thousands-separated integer, e.g. 1234567 -> "1,234,567".
pub(super) fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed-width block bar in the style "██████░░░░ 45.3%". Out-of-range
/// input fills an empty or full bar but keeps the raw number visible.
pub(super) fn percent_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = (BAR_WIDTH as f64 * clamped / 100.0).round() as usize;
    format!(
        "{}{} {percent:.1}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_walks_the_1024_ladder() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(format_bytes(2 * 1024_u64.pow(4)), "2.00 TB");
        assert_eq!(format_bytes(3 * 1024_u64.pow(5)), "3.00 PB");
    }

    #[test]
    fn unavailable_rates_render_as_na() {
        assert_eq!(format_byte_rate(None), "n/a");
        assert_eq!(format_count_rate(None), "n/a");
    }

    #[test]
    fn available_rates_carry_a_per_second_suffix() {
        assert_eq!(format_byte_rate(Some(2048.0)), "2.00 KB/s");
        assert_eq!(format_count_rate(Some(12.34)), "12.3/s");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn percent_bar_clamps_fill_but_prints_raw_value() {
        assert_eq!(percent_bar(0.0), format!("{} 0.0%", "░".repeat(20)));
        assert_eq!(percent_bar(100.0), format!("{} 100.0%", "█".repeat(20)));
        assert_eq!(percent_bar(150.0), format!("{} 150.0%", "█".repeat(20)));
        assert!(percent_bar(50.0).starts_with(&"█".repeat(10)));
    }
}
