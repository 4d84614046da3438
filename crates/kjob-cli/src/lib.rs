//! kjob CLI library
//!
//! Command-line surface over [`kjob_runner::JobRunner`]. Global flags select
//! the cluster, namespace and scope; each subcommand maps to one runner
//! operation.

#![deny(missing_docs)]

pub mod client;
pub mod commands;
pub mod error;

pub use error::{Error, Result};

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kjob_runner::{JobRunner, WaitConfig};

use crate::commands::SubmitArgs;

/// Upper bound for `--poll-interval` (one hour)
pub const MAX_POLL_INTERVAL_SECS: u64 = 60 * 60;

/// Upper bound for `--wait-timeout` (one week)
pub const MAX_WAIT_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;

/// kjob - run and reclaim Kubernetes batch jobs
#[derive(Parser, Debug)]
#[command(name = "kjob")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Flags shared by every subcommand
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to kubeconfig (inferred from the environment when omitted)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Namespace jobs live in
    #[arg(short, long, global = true, env = "KJOB_NAMESPACE", default_value = "default")]
    pub namespace: String,

    /// Ownership scope; empty uses the default scope
    #[arg(long, global = true, env = "KJOB_SCOPE", default_value = "")]
    pub scope: String,

    /// Seconds between completion polls
    #[arg(
        long,
        global = true,
        default_value_t = 2,
        value_parser = clap::value_parser!(u64).range(1..=MAX_POLL_INTERVAL_SECS)
    )]
    pub poll_interval: u64,

    /// Maximum seconds to wait for completion
    #[arg(
        long,
        global = true,
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..=MAX_WAIT_TIMEOUT_SECS)
    )]
    pub wait_timeout: u64,
}

impl GlobalArgs {
    /// Wait cadence and ceiling from the flags
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig {
            interval: Duration::from_secs(self.poll_interval),
            timeout: Duration::from_secs(self.wait_timeout),
        }
    }
}

/// One subcommand per runner operation
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a job
    Submit(SubmitArgs),
    /// List jobs owned by the scope
    List,
    /// Report whether a job exists and is owned by the scope
    Exists {
        /// Job name
        name: String,
    },
    /// Delete an owned job
    Delete {
        /// Job name
        name: String,
    },
    /// Wait for a job to complete
    Wait {
        /// Job name
        name: String,
    },
    /// Delete all finished jobs owned by the scope
    Cleanup,
    /// Print the logs of a job's first pod
    Logs {
        /// Job name
        name: String,
    },
}

impl Cli {
    /// Run the CLI command
    pub async fn run(self) -> Result<()> {
        let client = client::create_client(self.global.kubeconfig.as_deref()).await?;
        let runner = JobRunner::new(self.global.scope.clone(), client, self.global.namespace.clone())
            .with_wait_config(self.global.wait_config());

        match self.command {
            Commands::Submit(args) => commands::submit(&runner, args).await,
            Commands::List => commands::list(&runner).await,
            Commands::Exists { name } => commands::exists(&runner, &name).await,
            Commands::Delete { name } => commands::delete(&runner, &name).await,
            Commands::Wait { name } => commands::wait(&runner, &name).await,
            Commands::Cleanup => commands::cleanup(&runner).await,
            Commands::Logs { name } => commands::logs(&runner, &name).await,
        }
    }
}
