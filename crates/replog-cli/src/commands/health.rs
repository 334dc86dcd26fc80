//! `replogctl health`: print a master's `GET /health` tabulation once.

use anyhow::{Context, Result};

pub async fn run(server: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", server.trim_end_matches('/'));
    let body = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .text()
        .await
        .context("reading response body")?;

    print!("{body}");
    Ok(())
}
