//! `replogctl append`: POST one message to the master.

use anyhow::{Context, Result};

pub async fn run(server: &str, msg: &str, w: Option<u32>) -> Result<()> {
    let client = reqwest::Client::new();
    let resp = client
        .post(server)
        .json(&serde_json::json!({"msg": msg, "w": w}))
        .send()
        .await
        .with_context(|| format!("posting to {server}"))?;

    let status = resp.status();
    let body = resp.text().await.context("reading response body")?;
    print!("{body}");

    if !status.is_success() {
        anyhow::bail!("master responded with {status}");
    }
    Ok(())
}
