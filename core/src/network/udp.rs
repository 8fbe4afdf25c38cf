use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

const RECV_BUFFER_SIZE: usize = 1500;

/// Best-effort UDP liveness: send an empty datagram and wait for any reply.
///
/// Socket errors (including ICMP port unreachable surfacing as a refused
/// receive) and timeouts all count as "not reachable".
pub async fn datagram_probe(addr: SocketAddr, probe_timeout: Duration) -> bool {
    let socket = match UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await {
        Ok(socket) => socket,
        Err(e) => {
            debug!("could not bind udp socket: {e}");
            return false;
        }
    };

    if let Err(e) = socket.connect(addr).await {
        debug!("{addr} udp connect failed: {e}");
        return false;
    }

    if let Err(e) = socket.send(&[]).await {
        debug!("{addr} udp send failed: {e}");
        return false;
    }

    let mut buffer = [0u8; RECV_BUFFER_SIZE];
    matches!(timeout(probe_timeout, socket.recv(&mut buffer)).await, Ok(Ok(_)))
}
