// SPDX-License-Identifier: MIT

//! bqp - deploys a tree of local SQL source files to a warehouse and
//! reconciles remote state against it.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod bundle;
mod push;
mod scan;
mod sql_scan;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bqp", version, about = "Deploy a tree of local SQL source files to a warehouse")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan, deploy, and reconcile the local SQL tree against the warehouse.
    Push(push::PushArgs),
    /// Emit a deployment-ordered SQL script without touching the warehouse.
    Bundle(bundle::BundleArgs),
}

#[tokio::main]
async fn main() {
    setup_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Push(args) => push::run(args).await,
        Commands::Bundle(args) => bundle::run(args).await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
