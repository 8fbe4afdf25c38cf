use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use exposr_common::credential::Credential;
use exposr_common::network::transport::Transport;
use exposr_core::lookup::{HostLookup, HostView, LookupOutcome};
use exposr_core::network::probe::Reachability;

/// What the fake upstream answers for a given credential key.
#[derive(Clone)]
pub enum Reply {
    Host(&'static str),
    Reject,
    Fail(&'static str),
}

/// Answers by credential key, rejecting unknown keys, and keeps a call log.
pub struct ScriptedLookup {
    replies: Vec<(&'static str, Reply)>,
    calls: Mutex<Vec<(Ipv4Addr, String)>>,
}

impl ScriptedLookup {
    pub fn new(replies: &[(&'static str, Reply)]) -> Self {
        Self {
            replies: replies.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Ipv4Addr, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostLookup for ScriptedLookup {
    async fn view(&self, ip: Ipv4Addr, credential: &Credential) -> LookupOutcome {
        self.calls.lock().unwrap().push((ip, credential.key.clone()));

        let reply = self
            .replies
            .iter()
            .find(|(key, _)| *key == credential.key)
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Reject);

        match reply {
            Reply::Host(json) => LookupOutcome::Found(host(json)),
            Reply::Reject => LookupOutcome::Unauthorized,
            Reply::Fail(message) => LookupOutcome::Failed(message.to_string()),
        }
    }
}

/// Answers calls in order from a fixed list, whatever the credential; rejects once the list runs out.
pub struct SequencedLookup {
    replies: Vec<Reply>,
    served: Mutex<usize>,
}

impl SequencedLookup {
    pub fn new(replies: &[Reply]) -> Self {
        Self {
            replies: replies.to_vec(),
            served: Mutex::new(0),
        }
    }
}

#[async_trait]
impl HostLookup for SequencedLookup {
    async fn view(&self, _ip: Ipv4Addr, _credential: &Credential) -> LookupOutcome {
        let reply = {
            let mut served = self.served.lock().unwrap();
            let reply = self.replies.get(*served).cloned().unwrap_or(Reply::Reject);
            *served += 1;
            reply
        };

        match reply {
            Reply::Host(json) => LookupOutcome::Found(host(json)),
            Reply::Reject => LookupOutcome::Unauthorized,
            Reply::Fail(message) => LookupOutcome::Failed(message.to_string()),
        }
    }
}

/// Lets the listed TCP ports through; every UDP probe fails.
pub struct FixedPorts {
    open_tcp: HashSet<u16>,
}

impl FixedPorts {
    pub fn open(ports: &[u16]) -> Self {
        Self {
            open_tcp: ports.iter().copied().collect(),
        }
    }

    pub fn closed() -> Self {
        Self::open(&[])
    }
}

#[async_trait]
impl Reachability for FixedPorts {
    async fn probe(&self, _ip: Ipv4Addr, transport: Transport, port: u16) -> bool {
        transport.is_tcp() && self.open_tcp.contains(&port)
    }
}

pub fn host(json: &str) -> HostView {
    serde_json::from_str(json).expect("fixture host record must be valid JSON")
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub const WEB_HOST: &str = r#"{
    "dns": { "names": ["portal.example"] },
    "operating_system": { "product": "Linux" },
    "services": [
        { "port": 443, "transport_protocol": "TCP", "_decoded": "http",
          "software": [{ "product": "nginx", "version": "1.24.0" }, { "product": "Linux" }],
          "observed_at": "2024-06-02T08:15:00Z", "source_ip": "167.94.138.120" },
        { "port": 8443, "transport_protocol": "TCP", "_decoded": "http" },
        { "port": 161, "transport_protocol": "UDP", "_decoded": "snmp",
          "software": [{ "product": "net-snmp" }] }
    ]
}"#;

pub const EMPTY_HOST: &str = r#"{ "services": [] }"#;
