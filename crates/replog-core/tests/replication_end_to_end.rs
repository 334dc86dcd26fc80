//! End-to-end scenarios from spec.md §8, driven against real (wiremock)
//! secondary HTTP endpoints rather than in-process fakes, so the
//! `reqwest` client code path is exercised too.

use std::sync::Arc;
use std::time::Duration;

use replog_core::heartbeat::HeartbeatController;
use replog_core::master_log::LogStore;
use replog_core::replication::{ReplicationCoordinator, SecondaryClient};
use replog_core::replication::coordinator::SecondaryTarget;
use replog_types::WriteConcern;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn healthy_secondary() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

async fn build_coordinator(
    servers: &[&MockServer],
) -> (ReplicationCoordinator, Arc<LogStore>) {
    let secondaries: Vec<(u32, String, String)> = servers
        .iter()
        .enumerate()
        .map(|(i, s)| (i as u32 + 1, format!("s{}", i + 1), s.uri()))
        .collect();

    let (heartbeat, gates) = HeartbeatController::new(secondaries.clone());
    let heartbeat = Arc::new(heartbeat);
    heartbeat.probe_once().await;

    let log = Arc::new(LogStore::new());
    let cancel = CancellationToken::new();

    let targets = secondaries
        .into_iter()
        .map(|(id, name, base_url)| SecondaryTarget {
            client: SecondaryClient::new(base_url, name),
            pause: gates.get(&id).expect("gate for id").clone(),
        })
        .collect();

    let coordinator = ReplicationCoordinator::new(Arc::clone(&log), heartbeat, targets, cancel);
    (coordinator, log)
}

#[tokio::test]
async fn w_equals_one_acknowledges_before_any_secondary_ack() {
    // Health probe succeeds (so quorum holds) but the POST endpoint is
    // never mounted, so every replication attempt 404s and retries
    // forever in the background. w=1 needs zero secondary acks, so the
    // append must still succeed immediately.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (coordinator, log) = build_coordinator(&[&server]).await;
    let msg = coordinator
        .append("a".to_string(), WriteConcern(1))
        .await
        .expect("w=1 append succeeds immediately");

    assert_eq!(msg.msg, "a");
    assert!(msg.replicated_ts.is_some());
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn w_three_with_three_secondaries_waits_for_two_acks() {
    let s1 = healthy_secondary().await;
    let s2 = healthy_secondary().await;
    let s3 = healthy_secondary().await;

    let (coordinator, _log) = build_coordinator(&[&s1, &s2, &s3]).await;
    let msg = coordinator
        .append("b".to_string(), WriteConcern(3))
        .await
        .expect("w=3 append succeeds once 2 secondaries ack");

    assert!(msg.replicated_ts.is_some());

    // All three secondaries eventually receive the POST, including the
    // one whose ack wasn't required for the client response.
    tokio::time::sleep(Duration::from_millis(200)).await;
    for s in [&s1, &s2, &s3] {
        let received = s.received_requests().await.expect("requests log");
        assert!(received.iter().any(|r| r.method.as_str() == "POST"));
    }
}

#[tokio::test]
async fn w_exceeding_cluster_capacity_is_rejected() {
    let s1 = healthy_secondary().await;
    let (coordinator, log) = build_coordinator(&[&s1]).await;

    let err = coordinator
        .append("c".to_string(), WriteConcern(5))
        .await
        .unwrap_err();

    assert!(matches!(err, replog_core::CoreError::Validation(_)));
    assert_eq!(log.len(), 0, "no id is allocated for a rejected append");
}

#[tokio::test]
async fn no_quorum_rejects_without_allocating_an_id() {
    // A lone secondary whose /health endpoint is unmounted (404s) fails
    // its first probe: Unknown -> Suspected, which does not count
    // toward quorum, so the flag flips false after exactly one round.
    let server = MockServer::start().await;
    let secondaries = vec![(1u32, "s1".to_string(), server.uri())];

    let (heartbeat, gates) = HeartbeatController::new(secondaries);
    let heartbeat = Arc::new(heartbeat);
    heartbeat.probe_once().await;
    assert!(!heartbeat.quorum());

    let log = Arc::new(LogStore::new());
    let cancel = CancellationToken::new();
    let targets = vec![SecondaryTarget {
        client: SecondaryClient::new(server.uri(), "s1"),
        pause: gates.get(&1).expect("gate").clone(),
    }];
    let coordinator = ReplicationCoordinator::new(Arc::clone(&log), heartbeat, targets, cancel);

    let err = coordinator
        .append("d".to_string(), WriteConcern(1))
        .await
        .unwrap_err();

    assert!(matches!(err, replog_core::CoreError::NoQuorum));
    assert_eq!(log.len(), 0, "no id is allocated while quorum is lost");
}
