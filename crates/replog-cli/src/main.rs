//! `replogctl` - operational CLI for the replicated append-only log.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "replogctl", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a node's replication log (`GET /`).
    Tail {
        /// Node base URL, e.g. http://127.0.0.1:8000.
        server: String,
    },

    /// Print the master's view of secondary health (`GET /health`).
    Health {
        /// Master base URL, e.g. http://127.0.0.1:8000.
        server: String,
    },

    /// Append a message to the master (`POST /`).
    Append {
        /// Master base URL, e.g. http://127.0.0.1:8000.
        server: String,

        /// Message payload.
        msg: String,

        /// Write concern. Defaults to the master's own default (3).
        #[arg(short, long)]
        w: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Tail { server } => commands::tail::run(&server).await,
            Commands::Health { server } => commands::health::run(&server).await,
            Commands::Append { server, msg, w } => commands::append::run(&server, &msg, w).await,
        }
    })
}
