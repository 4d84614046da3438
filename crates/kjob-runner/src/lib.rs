//! Scope-owned lifecycle management for Kubernetes Jobs
//!
//! A [`JobRunner`] submits run-to-completion Jobs labelled with its scope,
//! waits for them to finish, fetches their logs, and reclaims finished ones.
//! Jobs from other scopes, or unlabelled Jobs, are never treated as owned.
//!
//! ```ignore
//! use kjob_runner::{Envs, JobRunner, RunOption};
//!
//! let runner = JobRunner::new("nightly", client, "batch");
//! let mut envs = Envs::new();
//! envs.add("TARGET", "prod");
//! runner
//!     .submit(&RunOption::new("report", "reporter:v3").with_envs(envs))
//!     .await?;
//! runner.wait("report").await?;
//! println!("{}", runner.logs("report").await?);
//! runner.cleanup().await?;
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod env;
pub mod error;
pub mod job;
pub mod labels;
pub mod poll;
pub mod runner;

pub use client::{Deletion, JobClient, KubeJobClient};
pub use env::Envs;
pub use error::{Error, Result};
pub use job::RunOption;
pub use labels::{LabelScheme, DEFAULT_SCOPE};
pub use poll::WaitConfig;
pub use runner::JobRunner;
