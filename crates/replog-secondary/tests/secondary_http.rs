//! `replog-secondary`'s `axum` router over real loopback TCP, covering
//! the ordering (scenario 3) and deduplication (scenario 4) cases from
//! spec.md §8.

use std::sync::Arc;
use std::time::Duration;

use replog_core::SecondaryLogStore;
use replog_secondary::{build_router, AppState};

async fn spawn_secondary() -> String {
    let state = Arc::new(AppState {
        log: SecondaryLogStore::new(),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn deduplicate_insert_of_same_id_is_a_no_op() {
    let base = spawn_secondary().await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({"id": 5, "msg": "x", "w": 1});
    let r1 = client.post(&base).json(&body).send().await.expect("POST 1");
    assert_eq!(r1.status(), reqwest::StatusCode::OK);
    let text1 = r1.text().await.expect("body1");
    assert!(text1.contains("has been replicated"));

    let r2 = client.post(&base).json(&body).send().await.expect("POST 2");
    assert_eq!(r2.status(), reqwest::StatusCode::OK);
    let text2 = r2.text().await.expect("body2");
    assert!(text2.contains("already exists"));
}

#[tokio::test]
async fn read_reflects_only_the_gap_free_prefix() {
    let base = spawn_secondary().await;
    let client = reqwest::Client::new();

    client
        .post(&base)
        .json(&serde_json::json!({"id": 2, "msg": "second", "w": 1}))
        .send()
        .await
        .expect("POST id 2");

    let resp = client.get(&base).send().await.expect("GET /");
    let body = resp.text().await.expect("body");
    assert!(body.contains("empty"), "gap at id 1 hides id 2 from readers");

    client
        .post(&base)
        .json(&serde_json::json!({"id": 1, "msg": "first", "w": 1}))
        .send()
        .await
        .expect("POST id 1");

    let resp = client.get(&base).send().await.expect("GET /");
    let body = resp.text().await.expect("body");
    assert!(body.contains("first"));
    assert!(body.contains("second"));
}

#[tokio::test]
async fn wait_payload_delays_visibility_until_the_hook_elapses() {
    let base = spawn_secondary().await;
    let client = reqwest::Client::new();

    // id 1 is the "wait" hook message; id 2 arrives and inserts first.
    let wait_client = client.clone();
    let wait_base = base.clone();
    let wait_post = tokio::spawn(async move {
        wait_client
            .post(&wait_base)
            .json(&serde_json::json!({"id": 1, "msg": "wait", "w": 1}))
            .send()
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    client
        .post(&base)
        .json(&serde_json::json!({"id": 2, "msg": "fast", "w": 1}))
        .send()
        .await
        .expect("POST id 2 arrives first");

    let resp = client.get(&base).send().await.expect("GET / before wait resolves");
    let body = resp.text().await.expect("body");
    assert!(
        body.contains("empty"),
        "id 2 landed but the prefix stays hidden behind id 1's pending wait"
    );

    wait_post.await.expect("wait POST task").expect("wait POST request");

    let resp = client.get(&base).send().await.expect("GET / after wait resolves");
    let body = resp.text().await.expect("body");
    assert!(body.contains("wait"));
    assert!(body.contains("fast"));
}
