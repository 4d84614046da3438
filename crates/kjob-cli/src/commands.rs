//! CLI commands

use clap::Args;
use kjob_runner::{Envs, JobClient, JobRunner, RunOption};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{Error, Result};

/// Arguments for `kjob submit`
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Job name, unique within the namespace
    pub name: String,

    /// Container image
    #[arg(long)]
    pub image: String,

    /// Environment variable as NAME=VALUE; repeatable, order is kept
    #[arg(short, long = "env", value_parser = parse_env)]
    pub envs: Vec<(String, String)>,

    /// Parallelism and completion count
    #[arg(short, long, default_value_t = 1)]
    pub replicas: i32,

    /// Override the image entrypoint (repeat for each element)
    #[arg(long)]
    pub command: Vec<String>,

    /// Container arguments
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl SubmitArgs {
    /// Options for the runner
    pub fn run_option(self) -> RunOption {
        let mut opt = RunOption::new(self.name, self.image).with_replicas(self.replicas);
        if !self.envs.is_empty() {
            opt = opt.with_envs(self.envs.into_iter().collect::<Envs>());
        }
        if !self.command.is_empty() {
            opt = opt.with_command(self.command);
        }
        if !self.args.is_empty() {
            opt = opt.with_args(self.args);
        }
        opt
    }
}

/// Parse a `NAME=VALUE` pair; the value may itself contain `=`
pub fn parse_env(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::InvalidEnv(s.to_string())),
    }
}

/// Submit a job built from the command-line arguments
pub async fn submit<C: JobClient>(runner: &JobRunner<C>, args: SubmitArgs) -> Result<()> {
    let name = args.name.clone();
    runner.submit(&args.run_option()).await?;
    println!("job/{} submitted", name);
    Ok(())
}

/// Print the names of owned jobs, one per line
pub async fn list<C: JobClient>(runner: &JobRunner<C>) -> Result<()> {
    for name in runner.list().await? {
        println!("{}", name);
    }
    Ok(())
}

/// Print `true` if the job exists and is owned by the scope, else `false`
pub async fn exists<C: JobClient>(runner: &JobRunner<C>, name: &str) -> Result<()> {
    println!("{}", runner.exists(name).await?);
    Ok(())
}

/// Delete an owned job
pub async fn delete<C: JobClient>(runner: &JobRunner<C>, name: &str) -> Result<()> {
    runner.delete(name).await?;
    println!("job/{} deleted", name);
    Ok(())
}

/// Wait for completion; Ctrl-C cancels the wait
pub async fn wait<C: JobClient>(runner: &JobRunner<C>, name: &str) -> Result<()> {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let signal = tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        trigger.cancel();
    });

    let result = runner.wait_with_cancel(name, &cancel).await;
    signal.abort();

    result?;
    println!("job/{} completed", name);
    Ok(())
}

/// Delete finished owned jobs and report how many were removed
pub async fn cleanup<C: JobClient>(runner: &JobRunner<C>) -> Result<()> {
    let deleted = runner.cleanup().await?;
    println!("deleted {} finished job(s)", deleted);
    Ok(())
}

/// Print the raw log output of the job's first pod
pub async fn logs<C: JobClient>(runner: &JobRunner<C>, name: &str) -> Result<()> {
    print!("{}", runner.logs(name).await?);
    Ok(())
}
