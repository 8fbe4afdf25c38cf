use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;

use exposr_common::network::transport::Transport;
use serde::{Serialize, Serializer};

/// One service observed on a host that survived reachability filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub port: u16,
    pub transport: Transport,
    pub service_name: String,
    /// `product` or `product_version` entries, OS product excluded.
    pub software: Vec<String>,
    pub observed_at: String,
    pub source_ip: String,
    /// Confirmed by an active probe rather than assumed reachable.
    pub checked: bool,
}

impl ServiceRecord {
    /// `443/TCP(checked)` for probed services, `53/UDP` otherwise.
    pub fn port_protocol(&self) -> String {
        let suffix = if self.checked { "(checked)" } else { "" };
        format!("{}/{}{}", self.port, self.transport, suffix)
    }
}

/// Outcome of querying a single IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HostResult {
    Services {
        domains: BTreeSet<String>,
        services: Vec<ServiceRecord>,
    },
    Failed {
        error: String,
    },
}

impl HostResult {
    pub fn is_error(&self) -> bool {
        matches!(self, HostResult::Failed { .. })
    }
}

/// Per-IP results in first-seen order.
///
/// Inserting an IP twice replaces the earlier result but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ScanResults {
    entries: Vec<(Ipv4Addr, HostResult)>,
    index: HashMap<Ipv4Addr, usize>,
}

impl ScanResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ip: Ipv4Addr, result: HostResult) {
        match self.index.get(&ip) {
            Some(&pos) => self.entries[pos].1 = result,
            None => {
                self.index.insert(ip, self.entries.len());
                self.entries.push((ip, result));
            }
        }
    }

    pub fn get(&self, ip: &Ipv4Addr) -> Option<&HostResult> {
        self.index.get(ip).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ipv4Addr, &HostResult)> {
        self.entries.iter().map(|(ip, result)| (ip, result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_error()).count()
    }
}

impl Serialize for ScanResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(ip, result)| (ip.to_string(), result)))
    }
}
