//! kjob CLI
//!
//! Submit, wait on, inspect and reclaim scope-owned Kubernetes Jobs.

use clap::Parser;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use kjob_cli::{Cli, Result};

/// Filter applied when `RUST_LOG` is unset; kube's request chatter is noise here
const DEFAULT_LOG_FILTER: &str = "info,kube=warn";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries command output (job names, logs); diagnostics stay on stderr
    let stderr = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    Cli::parse().run().await
}
