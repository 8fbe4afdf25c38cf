//! # Target expansion
//!
//! Turns the lines of a target file into concrete IPv4 addresses.
//!
//! Each line is one of:
//! * A single IPv4 address (e.g. `203.0.113.7`).
//! * A CIDR block (e.g. `203.0.113.0/24`), expanded to its usable hosts.
//!
//! Anything else is rejected and journaled; the remaining lines are still processed.

use std::net::Ipv4Addr;
use std::path::Path;

use tracing::warn;

use crate::error::ScanError;
use crate::error_log::ErrorLog;
use crate::network::range::{self, Ipv4Range};
use crate::success;

/// An address to query, remembering the input line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// 1-based line number in the target file.
    pub row: usize,
    pub addr: Ipv4Addr,
}

/// Expands one input line into the addresses it denotes.
pub fn expand_line(row: usize, line: &str) -> Result<Vec<Target>, ScanError> {
    let s = line.trim();

    if let Some(addr) = parse_host(s) {
        return Ok(vec![Target { row, addr }]);
    }

    if let Some(range) = parse_cidr_range(s) {
        return Ok(range.iter().map(|addr| Target { row, addr }).collect());
    }

    Err(ScanError::InvalidTarget { raw: s.to_string() })
}

/// Expands every line of `content`, journaling rejected lines (blank ones included) into `log`.
pub fn expand_all(content: &str, log: &mut ErrorLog) -> Vec<Target> {
    let mut targets = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let row = idx + 1;

        match expand_line(row, line) {
            Ok(expanded) => targets.extend(expanded),
            Err(e) => {
                warn!("Detected an invalid target on row {row}: {}", line.trim());
                log.record(row, line.trim(), &e);
            }
        }
    }

    targets
}

/// Reads and expands the target file at `path`.
pub fn read_targets(path: impl AsRef<Path>, log: &mut ErrorLog) -> Result<Vec<Target>, ScanError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::config(path, e))?;

    let targets = expand_all(&content, log);

    let len = targets.len();
    let unit = if len == 1 { "IP address has been" } else { "IP addresses have been" };
    success!("{len} {unit} parsed successfully");

    Ok(targets)
}

/// Four dot-separated decimal octets of 1-3 digits each. Zero padding is allowed.
fn parse_host(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');

    for octet in octets.iter_mut() {
        *octet = parse_octet(parts.next()?)?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u16>().ok().and_then(|value| u8::try_from(value).ok())
}

/// Parses CIDR notation like "192.168.1.0/24". Host bits may be set.
fn parse_cidr_range(s: &str) -> Option<Ipv4Range> {
    let (ip_str, prefix_str) = s.split_once('/')?;
    let ipv4_addr = parse_host(ip_str)?;
    let prefix = prefix_str.parse::<u8>().ok()?;

    range::cidr_hosts(ipv4_addr, prefix).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
