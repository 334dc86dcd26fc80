//! `replog-secondary` binary entry point.

use clap::Parser;
use replog_config::ConfigLoader;

/// A secondary node of the replicated append-only log.
#[derive(Parser)]
#[command(name = "replog-secondary", author, version, about)]
struct Args {
    /// This secondary's numeric id, as assigned in `config.json`.
    id: u32,

    /// Path to `config.json`. Defaults to `./config.json`.
    #[arg(long, default_value = "config.json")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let hosts = ConfigLoader::new().with_path(&args.config).load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if hosts.debug {
                    tracing::Level::DEBUG
                } else {
                    tracing::Level::INFO
                }
                .into(),
            ),
        )
        .init();

    tracing::info!(id = args.id, "Secondary host has been started");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(replog_secondary::run(hosts, args.id))
}
