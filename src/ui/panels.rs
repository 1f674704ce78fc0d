// Panel builders for the dashboard. A panel whose section failed to sample
// renders an "unavailable" placeholder with the degradation reason instead
// of fabricating zeros.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use super::format;
use crate::models::{DisplaySnapshot, Section};
use crate::severity::Severity;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Normal => Color::Green,
        Severity::Moderate => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

fn panel_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

fn unavailable(frame: &mut Frame, area: Rect, title: &str, reason: Option<&str>) {
    let body = Paragraph::new(format!("unavailable: {}", reason.unwrap_or("no data")))
        .style(Style::default().fg(Color::DarkGray))
        .block(panel_block(format!(" {title} ")));
    frame.render_widget(body, area);
}

fn unavailable_line(section: &str, reason: Option<&str>) -> Line<'static> {
    Line::from(Span::styled(
        format!("{section} unavailable: {}", reason.unwrap_or("no data")),
        Style::default().fg(Color::DarkGray),
    ))
}

pub(super) fn header(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let taken_at: DateTime<Local> = snapshot.taken_at.into();
    let title = format!("System Monitor - {}", taken_at.format("%Y-%m-%d %H:%M:%S"));
    let widget = Paragraph::new(title)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

pub(super) fn footer(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("q / Esc / Ctrl-C: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// CPU and memory summary with block bars colored by severity.
pub(super) fn system_overview(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let mut lines: Vec<Line> = Vec::new();

    match &snapshot.cpu {
        Some(cpu) => {
            lines.push(Line::from(vec![
                Span::raw("CPU  "),
                Span::styled(
                    format::percent_bar(cpu.overall_percent),
                    Style::default().fg(severity_color(cpu.severity)),
                ),
            ]));
            let mut detail = format!("{} logical cores", cpu.logical_cores);
            if cpu.frequency_mhz > 0 {
                detail.push_str(&format!(" @ {} MHz", cpu.frequency_mhz));
            }
            lines.push(Line::from(detail));
            if !cpu.per_core.is_empty() {
                let mut spans = vec![Span::raw("Cores")];
                for core in &cpu.per_core {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        format!("{:3.0}%", core.percent),
                        Style::default().fg(severity_color(core.severity)),
                    ));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(format!(
                "Load {:.2} {:.2} {:.2}",
                cpu.load_avg[0], cpu.load_avg[1], cpu.load_avg[2]
            )));
        }
        None => lines.push(unavailable_line("cpu", snapshot.degradation(Section::Cpu))),
    }

    lines.push(Line::default());

    match &snapshot.memory {
        Some(memory) => {
            lines.push(Line::from(vec![
                Span::raw("Mem  "),
                Span::styled(
                    format::percent_bar(memory.percent),
                    Style::default().fg(severity_color(memory.severity)),
                ),
            ]));
            lines.push(Line::from(format!(
                "Used {} / {}",
                format::format_bytes(memory.used),
                format::format_bytes(memory.total)
            )));
            lines.push(Line::from(format!(
                "Available {}",
                format::format_bytes(memory.available)
            )));
            if memory.swap_total > 0 {
                lines.push(Line::from(vec![
                    Span::raw("Swap "),
                    Span::styled(
                        format::percent_bar(memory.swap_percent),
                        Style::default().fg(severity_color(memory.swap_severity)),
                    ),
                ]));
                lines.push(Line::from(format!(
                    "Swap used {} / {}",
                    format::format_bytes(memory.swap_used),
                    format::format_bytes(memory.swap_total)
                )));
            }
        }
        None => lines.push(unavailable_line(
            "memory",
            snapshot.degradation(Section::Memory),
        )),
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(" System Overview ".to_string()));
    frame.render_widget(widget, area);
}

/// Ranked process table. CPU and memory percent cells carry their severity
/// color; the title shows the sort key and the pre-truncation match count.
pub(super) fn process_table(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let Some(view) = &snapshot.processes else {
        unavailable(
            frame,
            area,
            "Processes",
            snapshot.degradation(Section::Processes),
        );
        return;
    };

    let header = Row::new(vec![
        Cell::from("PID"),
        Cell::from("Name"),
        Cell::from("CPU %"),
        Cell::from("Memory %"),
        Cell::from("Memory (MB)"),
        Cell::from("Threads"),
        Cell::from("Status"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.entry.pid.to_string()),
            Cell::from(row.entry.name.clone()),
            Cell::from(format!("{:.1}", row.entry.cpu_percent))
                .style(Style::default().fg(severity_color(row.cpu_severity))),
            Cell::from(format!("{:.1}", row.entry.memory_percent))
                .style(Style::default().fg(severity_color(row.memory_severity))),
            Cell::from(format!(
                "{:.1}",
                row.entry.memory_bytes as f64 / (1024.0 * 1024.0)
            )),
            Cell::from(row.entry.thread_count.to_string()),
            Cell::from(row.entry.status.clone()),
        ])
    });

    let title = format!(
        " Processes by {} ({} matching) ",
        view.sort_key, view.matching
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(panel_block(title));
    frame.render_widget(table, area);
}

/// Network totals and derived rates. Rates without two samples behind them
/// show "n/a" rather than zero.
pub(super) fn network_stats(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let Some(view) = &snapshot.network else {
        unavailable(
            frame,
            area,
            "Network Statistics",
            snapshot.degradation(Section::Network),
        );
        return;
    };

    let totals = &view.totals;
    let rates = &snapshot.rates;
    let error_style = Style::default().fg(Color::Red);
    let connection_count = match view.connection_count {
        Some(count) => format::format_count(count as u64),
        None => "n/a".to_string(),
    };

    let rows = vec![
        metric_row("Bytes Sent", format::format_bytes(totals.bytes_sent)),
        metric_row("Bytes Received", format::format_bytes(totals.bytes_recv)),
        metric_row("Send Rate", format::format_byte_rate(rates.send_bytes_per_sec)),
        metric_row("Recv Rate", format::format_byte_rate(rates.recv_bytes_per_sec)),
        metric_row("Packets Sent", format::format_count(totals.packets_sent)),
        metric_row("Packets Received", format::format_count(totals.packets_recv)),
        metric_row(
            "Packet Send Rate",
            format::format_count_rate(rates.send_packets_per_sec),
        ),
        metric_row(
            "Packet Recv Rate",
            format::format_count_rate(rates.recv_packets_per_sec),
        ),
        metric_row("Errors In", format::format_count(totals.errors_in)).style(error_style),
        metric_row("Errors Out", format::format_count(totals.errors_out)).style(error_style),
        metric_row("Drops In", format::format_count(totals.drops_in)).style(error_style),
        metric_row("Drops Out", format::format_count(totals.drops_out)).style(error_style),
        metric_row("Active Connections", connection_count),
    ];

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(12)])
        .block(panel_block(" Network Statistics ".to_string()));
    frame.render_widget(table, area);
}

fn metric_row(label: &'static str, value: String) -> Row<'static> {
    Row::new(vec![Cell::from(label), Cell::from(value)])
}

/// Socket table in provider order, truncated to the configured limit.
pub(super) fn connections_table(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let Some(view) = &snapshot.connections else {
        unavailable(
            frame,
            area,
            "Active Network Connections",
            snapshot.degradation(Section::Connections),
        );
        return;
    };

    let header = Row::new(vec![
        Cell::from("PID"),
        Cell::from("Local Address"),
        Cell::from("Remote Address"),
        Cell::from("Status"),
        Cell::from("Type"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view.entries.iter().map(|conn| {
        let pid = match conn.pid {
            Some(pid) => pid.to_string(),
            None => "N/A".to_string(),
        };
        let remote = conn.remote_addr.clone().unwrap_or_else(|| "N/A".to_string());
        Row::new(vec![
            Cell::from(pid),
            Cell::from(conn.local_addr.clone()),
            Cell::from(remote),
            Cell::from(conn.status.clone()),
            Cell::from(conn.protocol.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(22),
            Constraint::Min(22),
            Constraint::Length(12),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(panel_block(format!(
        " Active Network Connections ({}) ",
        view.total
    )));
    frame.render_widget(table, area);
}

/// Mounted filesystem table; the usage cell carries the severity color.
pub(super) fn disk_table(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    let Some(disks) = &snapshot.disks else {
        unavailable(frame, area, "Disk Usage", snapshot.degradation(Section::Disks));
        return;
    };

    let header = Row::new(vec![
        Cell::from("Device"),
        Cell::from("Mount"),
        Cell::from("Type"),
        Cell::from("Total"),
        Cell::from("Used"),
        Cell::from("Free"),
        Cell::from("Use %"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = disks.iter().map(|disk| {
        let usage = &disk.usage;
        Row::new(vec![
            Cell::from(usage.device.clone()),
            Cell::from(usage.mount.clone()),
            Cell::from(usage.fs_type.clone()),
            Cell::from(format::format_bytes(usage.total)),
            Cell::from(format::format_bytes(usage.used)),
            Cell::from(format::format_bytes(usage.available)),
            Cell::from(format!("{:.1}", usage.percent))
                .style(Style::default().fg(severity_color(disk.severity))),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(panel_block(" Disk Usage ".to_string()));
    frame.render_widget(table, area);
}

/// Aggregate disk throughput derived from consecutive counter reads.
pub(super) fn disk_io(frame: &mut Frame, area: Rect, snapshot: &DisplaySnapshot) {
    if let Some(reason) = snapshot.degradation(Section::DiskIo) {
        unavailable(frame, area, "Disk I/O", Some(reason));
        return;
    }

    let rates = &snapshot.rates;
    let lines = vec![
        Line::from(format!(
            "Read  {}",
            format::format_byte_rate(rates.disk_read_bytes_per_sec)
        )),
        Line::from(format!(
            "Write {}",
            format::format_byte_rate(rates.disk_write_bytes_per_sec)
        )),
    ];
    let widget = Paragraph::new(lines).block(panel_block(" Disk I/O ".to_string()));
    frame.render_widget(widget, area);
}
