// tests/remote_errors.rs
//
// Failure-path tests for the remote classification client: the call is
// fail-open (returns None) and the error counter records the failure. Uses a
// debugging metrics recorder installed for this test binary only; the target
// URL points at a closed local port so no external network is touched.

use std::time::Duration;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use newswatch::remote::{HfClassifier, ZeroShotClassifier};

#[tokio::test]
async fn connection_failure_is_fail_open_and_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("install debugging recorder");

    let client = HfClassifier::new(
        "http://127.0.0.1:9/classify",
        "test-key",
        Duration::from_secs(1),
    );
    let verdict = client.classify("quiet afternoon", &["war"]).await;
    assert!(verdict.is_none(), "transport failure must yield no verdict");

    let snapshot = snapshotter.snapshot().into_vec();
    let (_key, _unit, _desc, value) = snapshot
        .iter()
        .find(|(key, _, _, _)| key.key().name() == "poll_remote_errors_total")
        .expect("remote error counter recorded");
    match value {
        DebugValue::Counter(n) => assert!(*n >= 1, "counter should have incremented"),
        other => panic!("expected a counter, got {other:?}"),
    }
}
