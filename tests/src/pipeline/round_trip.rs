use std::net::Ipv4Addr;

use exposr_common::credential::CredentialPool;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target;
use exposr_core::engine::QueryEngine;
use exposr_core::models::HostResult;

use crate::support::{EMPTY_HOST, FixedPorts, Reply, ScriptedLookup, SequencedLookup, write_file};

#[tokio::test]
async fn single_credential_single_ip() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_file(dir.path(), "keys.txt", "api-id:api-secret\n");
    let targets = write_file(dir.path(), "ips.txt", "198.51.100.20\n");

    let mut log = ErrorLog::in_memory();
    let pool = CredentialPool::load(&credentials).unwrap();
    let targets = target::read_targets(&targets, &mut log).unwrap();

    let lookup = ScriptedLookup::new(&[("api-id", Reply::Host(EMPTY_HOST))]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);
    let results = engine.run(&targets, &mut log).await.unwrap();

    assert_eq!(results.len(), 1);
    let (ip, result) = results.iter().next().unwrap();
    assert_eq!(ip.to_string(), "198.51.100.20");
    assert!(matches!(result, HostResult::Services { .. }));
    assert!(log.is_empty());
}

#[tokio::test]
async fn bad_lines_are_logged_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let targets = write_file(dir.path(), "ips.txt", "10.0.0.0/30\nnot an ip\n10.0.0.9\n");
    let log_path = dir.path().join("log_err.txt");

    let mut log = ErrorLog::open(&log_path).unwrap();
    let targets = target::read_targets(&targets, &mut log).unwrap();
    drop(log);

    let addrs: Vec<String> = targets.iter().map(|t| t.addr.to_string()).collect();
    assert_eq!(addrs, vec!["10.0.0.1", "10.0.0.2", "10.0.0.9"]);

    let written = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(written, "row 2:not an ip -> not a valid IP or CIDR block\n");
}

#[tokio::test]
async fn repeated_ip_keeps_last_result() {
    let dir = tempfile::tempdir().unwrap();
    let targets = write_file(dir.path(), "ips.txt", "203.0.113.4\n203.0.113.4\n");
    let mut log = ErrorLog::in_memory();
    let targets = target::read_targets(&targets, &mut log).unwrap();

    let lookup = SequencedLookup::new(&[Reply::Host(FIRST_SIGHTING), Reply::Host(SECOND_SIGHTING)]);
    let pool = CredentialPool::parse("k:s");
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);
    let results = engine.run(&targets, &mut log).await.unwrap();

    assert_eq!(results.len(), 1);
    let repeated: Ipv4Addr = "203.0.113.4".parse().unwrap();
    match results.get(&repeated) {
        Some(HostResult::Services { domains, .. }) => {
            assert_eq!(domains.iter().collect::<Vec<_>>(), ["second.example"]);
        }
        other => panic!("expected the second lookup to be kept, got {other:?}"),
    }
}

const FIRST_SIGHTING: &str = r#"{ "dns": { "names": ["first.example"] }, "services": [] }"#;
const SECOND_SIGHTING: &str = r#"{ "dns": { "names": ["second.example"] }, "services": [] }"#;
