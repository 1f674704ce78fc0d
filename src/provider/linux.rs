// Linux-specific reads: the /proc/net tables sysinfo does not expose.

#[cfg(target_os = "linux")]
use std::collections::HashMap;
#[cfg(target_os = "linux")]
use std::net::{Ipv4Addr, Ipv6Addr};

use super::ProviderError;
#[cfg(target_os = "linux")]
use crate::models::ConnProtocol;
use crate::models::ConnectionSample;

/// Sum of (receive drops, transmit drops) across all interfaces from
/// /proc/net/dev, or None when the file is unavailable.
pub(super) fn read_net_drop_totals() -> Option<(u64, u64)> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/net/dev").ok()?;
        let mut drops_in = 0u64;
        let mut drops_out = 0u64;
        for line in content.lines().skip(2) {
            let Some((_, counters)) = line.split_once(':') else {
                continue;
            };
            let values: Vec<u64> = counters
                .split_whitespace()
                .filter_map(|v| v.parse().ok())
                .collect();
            if values.len() < 16 {
                continue;
            }
            drops_in += values[3];
            drops_out += values[11];
        }
        return Some((drops_in, drops_out));
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// All TCP and UDP sockets from /proc/net/{tcp,tcp6,udp,udp6}, with owning
/// pids resolved through one scan of /proc/*/fd. A missing v6 table (IPv6
/// disabled) is skipped; any other read failure fails the whole sub-read.
pub(super) fn read_connection_table() -> Result<Vec<ConnectionSample>, ProviderError> {
    #[cfg(target_os = "linux")]
    {
        let tables = [
            ("/proc/net/tcp", ConnProtocol::Tcp),
            ("/proc/net/tcp6", ConnProtocol::Tcp),
            ("/proc/net/udp", ConnProtocol::Udp),
            ("/proc/net/udp6", ConnProtocol::Udp),
        ];
        let owners = socket_inode_owners();
        let mut connections = Vec::new();
        for (path, protocol) in tables {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    parse_socket_table(&content, protocol, &owners, &mut connections);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(ProviderError::Io {
                        context: "connections",
                        source,
                    });
                }
            }
        }
        return Ok(connections);
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProviderError::Io {
        context: "connections",
        source: std::io::Error::from(std::io::ErrorKind::Unsupported),
    })
}

/// Map socket inode -> owning pid from one scan of /proc/*/fd. Unreadable
/// fd directories (other users' processes) are skipped, leaving those
/// sockets without an owner, which matches what an unprivileged caller can
/// see.
#[cfg(target_os = "linux")]
fn socket_inode_owners() -> HashMap<u64, u32> {
    let mut owners = HashMap::new();
    let Ok(entries) = std::fs::read_dir("/proc") else {
        return owners;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(pid) = name.to_str().and_then(|n| n.parse::<u32>().ok()) else {
            continue;
        };
        let Ok(fds) = std::fs::read_dir(entry.path().join("fd")) else {
            continue;
        };
        for fd in fds.flatten() {
            let Ok(link) = std::fs::read_link(fd.path()) else {
                continue;
            };
            if let Some(inode) = link
                .to_str()
                .and_then(|t| t.strip_prefix("socket:["))
                .and_then(|t| t.strip_suffix(']'))
                .and_then(|t| t.parse::<u64>().ok())
            {
                owners.insert(inode, pid);
            }
        }
    }
    owners
}

/// Parse one /proc/net socket table. Lines are whitespace-split with the
/// local address in field 1, remote in 2, state code in 3, inode in 9.
#[cfg(target_os = "linux")]
fn parse_socket_table(
    content: &str,
    protocol: ConnProtocol,
    owners: &HashMap<u64, u32>,
    out: &mut Vec<ConnectionSample>,
) {
    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }
        let Some(local_addr) = decode_socket_addr(fields[1]) else {
            continue;
        };
        // Port 0 means unconnected (e.g. a listener's remote side).
        let remote_addr = decode_socket_addr(fields[2]).filter(|a| !a.ends_with(":0"));
        let status = match protocol {
            ConnProtocol::Tcp => tcp_state_name(fields[3]).to_string(),
            ConnProtocol::Udp => "-".to_string(),
        };
        let pid = fields[9]
            .parse::<u64>()
            .ok()
            .filter(|&inode| inode != 0)
            .and_then(|inode| owners.get(&inode).copied());
        out.push(ConnectionSample {
            protocol,
            local_addr,
            remote_addr,
            status,
            pid,
        });
    }
}

/// Decode a kernel hex socket address ("0100007F:0CEA" or the 32-digit v6
/// form). The kernel writes each 32-bit group in host byte order.
#[cfg(target_os = "linux")]
fn decode_socket_addr(field: &str) -> Option<String> {
    let (ip_hex, port_hex) = field.split_once(':')?;
    let port = u16::from_str_radix(port_hex, 16).ok()?;
    match ip_hex.len() {
        8 => {
            let raw = u32::from_str_radix(ip_hex, 16).ok()?;
            Some(format!("{}:{}", Ipv4Addr::from(raw.to_le_bytes()), port))
        }
        32 => {
            let mut bytes = [0u8; 16];
            for (i, group) in ip_hex.as_bytes().chunks(8).enumerate() {
                let group = std::str::from_utf8(group).ok()?;
                let raw = u32::from_str_radix(group, 16).ok()?;
                bytes[i * 4..i * 4 + 4].copy_from_slice(&raw.to_le_bytes());
            }
            Some(format!("[{}]:{}", Ipv6Addr::from(bytes), port))
        }
        _ => None,
    }
}

#[cfg(target_os = "linux")]
const TCP_STATES: &[(u8, &str)] = &[
    (0x01, "ESTABLISHED"),
    (0x02, "SYN_SENT"),
    (0x03, "SYN_RECV"),
    (0x04, "FIN_WAIT1"),
    (0x05, "FIN_WAIT2"),
    (0x06, "TIME_WAIT"),
    (0x07, "CLOSE"),
    (0x08, "CLOSE_WAIT"),
    (0x09, "LAST_ACK"),
    (0x0A, "LISTEN"),
    (0x0B, "CLOSING"),
];

#[cfg(target_os = "linux")]
fn tcp_state_name(code: &str) -> &'static str {
    u8::from_str_radix(code, 16)
        .ok()
        .and_then(|code| {
            TCP_STATES
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, name)| *name)
        })
        .unwrap_or("UNKNOWN")
}
