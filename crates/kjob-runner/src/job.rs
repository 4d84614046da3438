//! Job manifest construction and status inspection
//!
//! Builds the `batch/v1 Job` submitted for a [`RunOption`]. Each Job runs a
//! single `container` with the requested image, env and args, labelled for
//! its owning scope on both the Job and its pod template.

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

use crate::env::{self, Envs};
use crate::labels::Labels;

/// Name of the single container in every job pod
pub const CONTAINER_NAME: &str = "container";

/// Container restart policy; failed containers are restarted in place
pub const RESTART_POLICY: &str = "OnFailure";

/// Options for submitting a job
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunOption {
    /// Job name, unique within the namespace
    pub name: String,
    /// Container image reference
    pub image: String,
    /// Container environment
    pub envs: Option<Envs>,
    /// Overrides the image entrypoint when set
    pub command: Option<Vec<String>>,
    /// Container arguments
    pub args: Option<Vec<String>>,
    /// Parallelism and completion count; values <= 0 mean 1
    pub replicas: i32,
}

impl RunOption {
    /// Options for a single-replica job running `image`
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    /// Set the container environment
    pub fn with_envs(mut self, envs: Envs) -> Self {
        self.envs = Some(envs);
        self
    }

    /// Set the container entrypoint
    pub fn with_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = Some(command.into_iter().map(Into::into).collect());
        self
    }

    /// Set the container arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Set the replica count
    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    /// Replica count after normalization
    pub fn effective_replicas(&self) -> i32 {
        normalize_replicas(self.replicas)
    }
}

/// Non-positive replica counts run a single pod
pub fn normalize_replicas(replicas: i32) -> i32 {
    if replicas <= 0 {
        1
    } else {
        replicas
    }
}

/// Build the Job for `opt`, labelled with `labels` on the Job and pod template.
pub fn build_job(opt: &RunOption, namespace: &str, labels: Labels) -> Job {
    let replicas = opt.effective_replicas();
    let env = env::render(opt.envs.as_ref());

    let container = Container {
        name: CONTAINER_NAME.to_string(),
        image: Some(opt.image.clone()),
        env: (!env.is_empty()).then_some(env),
        command: opt.command.clone(),
        args: opt.args.clone(),
        ..Default::default()
    };

    Job {
        metadata: ObjectMeta {
            name: Some(opt.name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(JobSpec {
            parallelism: Some(replicas),
            completions: Some(replicas),
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    restart_policy: Some(RESTART_POLICY.to_string()),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The job's completion timestamp, if the orchestrator has set one
pub fn completion_time(job: &Job) -> Option<&Time> {
    job.status.as_ref().and_then(|s| s.completion_time.as_ref())
}

/// True once the job has a completion timestamp.
///
/// This is the only completion signal used; it says nothing about whether
/// the job succeeded.
pub fn is_finished(job: &Job) -> bool {
    completion_time(job).is_some()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use k8s_openapi::api::batch::v1::JobStatus;

    use crate::labels::{ownership_labels, NAME_LABEL};

    /// A job named `name` owned by `scope`, finished if `finished`
    pub fn owned_job(name: &str, scope: &str, finished: bool) -> Job {
        let mut labels = ownership_labels(scope);
        labels.insert(NAME_LABEL.to_string(), name.to_string());
        Job {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(labels),
                ..Default::default()
            },
            status: Some(JobStatus {
                completion_time: finished.then(|| Time(chrono::Utc::now())),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
