use std::net::Ipv4Addr;

use exposr_common::credential::CredentialPool;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target::Target;
use exposr_core::engine::QueryEngine;
use exposr_core::models::HostResult;

use crate::support::{FixedPorts, Reply, ScriptedLookup, WEB_HOST};

const THIRD_ONLY: &str = r#"{ "dns": { "names": ["from-third.example"] }, "services": [] }"#;

fn target() -> Target {
    Target {
        row: 1,
        addr: Ipv4Addr::new(192, 0, 2, 44),
    }
}

#[tokio::test]
async fn third_credential_commits_after_two_rejections() {
    let pool = CredentialPool::parse("one:id-1:s\ntwo:id-2:s\nthree:id-3:s\n");
    let lookup = ScriptedLookup::new(&[
        ("id-1", Reply::Reject),
        ("id-2", Reply::Reject),
        ("id-3", Reply::Host(THIRD_ONLY)),
    ]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);
    let mut log = ErrorLog::in_memory();

    let results = engine.run(&[target()], &mut log).await.unwrap();

    let Some(HostResult::Services { domains, .. }) = results.get(&target().addr) else {
        panic!("expected a committed host result");
    };
    assert!(domains.contains("from-third.example"));
    assert_eq!(engine.rejections(), 2);
    assert_eq!(
        log.entries(),
        [
            "row 1:192.0.2.44 -> API 'one' unauthorized",
            "row 1:192.0.2.44 -> API 'two' unauthorized",
        ]
    );
}

#[tokio::test]
async fn lookup_count_matches_attempts() {
    let pool = CredentialPool::parse("id-1:s\nid-2:s\nid-3:s\n");
    let lookup = ScriptedLookup::new(&[("id-3", Reply::Host(THIRD_ONLY))]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);
    let mut log = ErrorLog::in_memory();

    engine.query(&target(), &mut log).await.unwrap();

    assert_eq!(engine_calls(&engine), 3);
}

#[tokio::test]
async fn non_auth_failure_is_recorded_inline() {
    let pool = CredentialPool::parse("flaky:s\nbackup:s\n");
    let lookup = ScriptedLookup::new(&[
        ("flaky", Reply::Fail("API error (429 Too Many Requests)")),
        ("backup", Reply::Host(WEB_HOST)),
    ]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::open(&[443]), pool);
    let mut log = ErrorLog::in_memory();

    let results = engine.run(&[target()], &mut log).await.unwrap();

    assert_eq!(
        results.get(&target().addr),
        Some(&HostResult::Failed {
            error: "API error (429 Too Many Requests)".to_string()
        })
    );
    assert_eq!(engine_calls(&engine), 1);
}

fn engine_calls(engine: &QueryEngine<ScriptedLookup, FixedPorts>) -> usize {
    engine.lookup().calls().len()
}
