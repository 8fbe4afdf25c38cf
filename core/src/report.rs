//! Flattens per-IP results into spreadsheet rows.
//!
//! IPs whose lookup failed produce no rows. Their errors are already in the
//! console output and the error log.

use exposr_common::error::ScanError;
use tracing::debug;

use crate::models::{HostResult, ScanResults};

pub mod workbook;

pub const RECOMMENDATION: &str = "verify whether the port is in use; if not, restrict access to it";

pub const COLUMNS: [&str; 9] = [
    "IP",
    "Domain",
    "Port/Protocol",
    "Service",
    "Product",
    "Note",
    "Recommendation",
    "LastChecked",
    "SourceIP",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub ip: String,
    pub domain: String,
    pub port_protocol: String,
    pub service: String,
    pub product: String,
    pub note: String,
    pub recommendation: String,
    pub last_checked: String,
    pub source_ip: String,
}

impl ReportRow {
    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.ip,
            &self.domain,
            &self.port_protocol,
            &self.service,
            &self.product,
            &self.note,
            &self.recommendation,
            &self.last_checked,
            &self.source_ip,
        ]
    }
}

/// One row per reported service, in result order.
pub fn shape(results: &ScanResults) -> Result<Vec<ReportRow>, ScanError> {
    let mut rows = Vec::new();

    for (ip, result) in results.iter() {
        let HostResult::Services { domains, services } = result else {
            debug!("{ip} has no services to report");
            continue;
        };

        let domain = domains.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        rows.extend(services.iter().map(|service| ReportRow {
            ip: ip.to_string(),
            domain: domain.clone(),
            port_protocol: service.port_protocol(),
            service: service.service_name.clone(),
            product: service.software.join(", "),
            note: String::new(),
            recommendation: RECOMMENDATION.to_string(),
            last_checked: service.observed_at.clone(),
            source_ip: service.source_ip.clone(),
        }));
    }

    if rows.is_empty() {
        return Err(ScanError::EmptyReport);
    }

    Ok(rows)
}
