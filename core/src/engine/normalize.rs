use std::collections::BTreeSet;

use exposr_common::error::ScanError;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target::Target;
use exposr_common::network::transport::Transport;
use tracing::{debug, warn};

use crate::lookup::{HostView, RawService};
use crate::models::{HostResult, ServiceRecord};
use crate::network::probe::Reachability;

/// Turns a raw host record into the services worth reporting.
///
/// TCP services are kept only if an active probe connects. Every other
/// transport is kept unconditionally and carries no software list.
pub async fn normalize<P>(target: &Target, view: HostView, prober: &P, log: &mut ErrorLog) -> HostResult
where
    P: Reachability + ?Sized,
{
    let domains: BTreeSet<String> = view.domain_names().iter().cloned().collect();
    let os_product = view.os_product();

    let mut services = Vec::new();
    for raw in &view.services {
        let Some(port) = raw.port else {
            debug!("{}: skipping service entry without a port", target.addr);
            continue;
        };
        let transport = Transport::from(raw.transport_protocol.as_deref().unwrap_or_default());

        let record = if transport.is_tcp() {
            if !prober.probe(target.addr, transport, port).await {
                let closed = ScanError::PortUnreachable { port, transport };
                warn!("{}:{port} is not reachable, dropping it", target.addr);
                log.record(target.row, format!("{}:{port}", target.addr), &closed);
                continue;
            }
            service_record(raw, port, transport, software_list(raw, os_product), true)
        } else {
            service_record(raw, port, transport, Vec::new(), false)
        };

        services.push(record);
    }

    HostResult::Services { domains, services }
}

/// Software names of a service, leaving out entries that just repeat the host OS.
fn software_list(raw: &RawService, os_product: Option<&str>) -> Vec<String> {
    raw.software
        .iter()
        .filter(|software| software.product.as_deref() != os_product)
        .map(|software| software.display_name())
        .collect()
}

fn service_record(
    raw: &RawService,
    port: u16,
    transport: Transport,
    software: Vec<String>,
    checked: bool,
) -> ServiceRecord {
    let service_name = raw
        .decoded
        .as_deref()
        .or(raw.service_name.as_deref())
        .unwrap_or_default()
        .to_string();

    ServiceRecord {
        port,
        transport,
        service_name,
        software,
        observed_at: raw.observed_at.clone().unwrap_or_default(),
        source_ip: raw.source_ip.clone().unwrap_or_default(),
        checked,
    }
}
