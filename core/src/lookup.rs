//! The seam between the query engine and the host-intelligence service.
//!
//! The engine only ever sees a [`LookupOutcome`] per attempt, which keeps the
//! credential rotation logic independent of the HTTP adapter in [`censys`].

use std::net::Ipv4Addr;

use async_trait::async_trait;
use exposr_common::credential::Credential;
use serde::Deserialize;

pub mod censys;

/// Result of a single lookup attempt with a single credential.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Found(HostView),
    /// The service rejected the credential.
    Unauthorized,
    /// Anything else: transport error, bad status, undecodable body.
    Failed(String),
}

#[async_trait]
pub trait HostLookup: Send + Sync {
    async fn view(&self, ip: Ipv4Addr, credential: &Credential) -> LookupOutcome;
}

/// The parts of a host record the pipeline reads. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostView {
    pub dns: Option<Dns>,
    pub operating_system: Option<Software>,
    #[serde(default)]
    pub services: Vec<RawService>,
}

impl HostView {
    pub fn domain_names(&self) -> &[String] {
        self.dns.as_ref().map(|dns| dns.names.as_slice()).unwrap_or_default()
    }

    pub fn os_product(&self) -> Option<&str> {
        self.operating_system.as_ref().and_then(|os| os.product.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dns {
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawService {
    pub port: Option<u16>,
    pub transport_protocol: Option<String>,
    #[serde(rename = "_decoded")]
    pub decoded: Option<String>,
    pub service_name: Option<String>,
    #[serde(default)]
    pub software: Vec<Software>,
    pub observed_at: Option<String>,
    pub source_ip: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Software {
    pub product: Option<String>,
    pub version: Option<String>,
}

impl Software {
    /// `product` or `product_version`.
    pub fn display_name(&self) -> String {
        let product = self.product.as_deref().unwrap_or_default();
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => format!("{product}_{version}"),
            _ => product.to_string(),
        }
    }
}
