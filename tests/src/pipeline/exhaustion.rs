use exposr_common::credential::CredentialPool;
use exposr_common::error::ScanError;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target;
use exposr_core::engine::QueryEngine;

use crate::support::{FixedPorts, ScriptedLookup};

#[tokio::test]
async fn run_stops_on_last_cumulative_rejection() {
    let pool = CredentialPool::parse("a:s\nb:s\nc:s\n");
    let lookup = ScriptedLookup::new(&[]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);

    let mut log = ErrorLog::in_memory();
    let targets = target::expand_all("10.20.0.0/28\n", &mut log);
    assert_eq!(targets.len(), 14);

    let err = engine.run(&targets, &mut log).await.unwrap_err();

    assert!(matches!(err, ScanError::CredentialsExhausted { attempts: 3 }));
    assert!(err.is_fatal());

    let calls = engine.lookup().calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(ip, _)| ip.to_string() == "10.20.0.1"));
    assert_eq!(
        log.entries(),
        [
            "row 1:10.20.0.1 -> API 'a' unauthorized",
            "row 1:10.20.0.1 -> API 'b' unauthorized",
            "row 1:10.20.0.1 -> API 'c' unauthorized",
            "row 1:10.20.0.1 -> no API available",
        ]
    );
}

#[tokio::test]
async fn single_rejected_credential_stops_immediately() {
    let pool = CredentialPool::parse("only:s\n");
    let lookup = ScriptedLookup::new(&[]);
    let mut engine = QueryEngine::new(lookup, FixedPorts::closed(), pool);
    let mut log = ErrorLog::in_memory();
    let targets = target::expand_all("192.0.2.1\n192.0.2.2\n", &mut log);

    let err = engine.run(&targets, &mut log).await.unwrap_err();

    assert!(matches!(err, ScanError::CredentialsExhausted { attempts: 1 }));
    assert_eq!(engine.lookup().calls().len(), 1);
}
