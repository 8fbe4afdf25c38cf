//! Port reachability checks used to filter advertised services.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use exposr_common::config::PROBE_TIMEOUT;
use exposr_common::network::transport::Transport;

use crate::network::{tcp, udp};

#[async_trait]
pub trait Reachability: Send + Sync {
    async fn probe(&self, ip: Ipv4Addr, transport: Transport, port: u16) -> bool;
}

/// Probes with real sockets. One attempt per call, no retries.
#[derive(Debug, Clone, Copy)]
pub struct SocketProber {
    timeout: Duration,
}

impl SocketProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SocketProber {
    fn default() -> Self {
        Self::new(PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Reachability for SocketProber {
    async fn probe(&self, ip: Ipv4Addr, transport: Transport, port: u16) -> bool {
        let addr = SocketAddr::new(IpAddr::V4(ip), port);
        match transport {
            Transport::Tcp => tcp::connect_probe(addr, self.timeout).await,
            Transport::Udp => udp::datagram_probe(addr, self.timeout).await,
        }
    }
}
