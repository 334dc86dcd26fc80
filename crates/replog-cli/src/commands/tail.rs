//! `replogctl tail`: print a node's `GET /` tabulation once.

use anyhow::{Context, Result};

pub async fn run(server: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let body = client
        .get(server)
        .send()
        .await
        .with_context(|| format!("requesting {server}"))?
        .text()
        .await
        .context("reading response body")?;

    print!("{body}");
    Ok(())
}
