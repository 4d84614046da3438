//! Namespace-scoped access to Job and Pod resources
//!
//! [`JobClient`] is the set of orchestrator capabilities the runner needs.
//! Not-found is reported as a value (`None`, [`Deletion::NotFound`]) rather
//! than an error, so callers branch on a tag instead of inspecting errors.

use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams, LogParams, PostParams};
use kube::Client;

#[cfg(test)]
use mockall::automock;

use crate::error::is_not_found;

/// Outcome of a delete request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deletion {
    /// The API server accepted the delete
    Accepted,
    /// The resource was already gone
    NotFound,
}

/// Job and Pod operations within a single namespace
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Create a job
    async fn create_job(&self, job: &Job) -> Result<Job, kube::Error>;

    /// Get a job by name, `None` if it does not exist
    async fn get_job(&self, name: &str) -> Result<Option<Job>, kube::Error>;

    /// List jobs matching a label selector
    async fn list_jobs(&self, selector: &str) -> Result<Vec<Job>, kube::Error>;

    /// Delete a job, removing its pods in the background
    async fn delete_job(&self, name: &str) -> Result<Deletion, kube::Error>;

    /// List pods matching a label selector
    async fn list_pods(&self, selector: &str) -> Result<Vec<Pod>, kube::Error>;

    /// Full log output of a pod's container
    async fn pod_logs(&self, pod: &str) -> Result<String, kube::Error>;
}

/// [`JobClient`] backed by a `kube::Client`
#[derive(Clone)]
pub struct KubeJobClient {
    jobs: Api<Job>,
    pods: Api<Pod>,
}

impl KubeJobClient {
    /// Create a client scoped to `namespace`
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            jobs: Api::namespaced(client.clone(), namespace),
            pods: Api::namespaced(client, namespace),
        }
    }
}

#[async_trait]
impl JobClient for KubeJobClient {
    async fn create_job(&self, job: &Job) -> Result<Job, kube::Error> {
        self.jobs.create(&PostParams::default(), job).await
    }

    async fn get_job(&self, name: &str) -> Result<Option<Job>, kube::Error> {
        match self.jobs.get(name).await {
            Ok(job) => Ok(Some(job)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_jobs(&self, selector: &str) -> Result<Vec<Job>, kube::Error> {
        let list = self.jobs.list(&ListParams::default().labels(selector)).await?;
        Ok(list.items)
    }

    async fn delete_job(&self, name: &str) -> Result<Deletion, kube::Error> {
        match self.jobs.delete(name, &DeleteParams::background()).await {
            Ok(_) => Ok(Deletion::Accepted),
            Err(e) if is_not_found(&e) => Ok(Deletion::NotFound),
            Err(e) => Err(e),
        }
    }

    async fn list_pods(&self, selector: &str) -> Result<Vec<Pod>, kube::Error> {
        let list = self.pods.list(&ListParams::default().labels(selector)).await?;
        Ok(list.items)
    }

    async fn pod_logs(&self, pod: &str) -> Result<String, kube::Error> {
        self.pods.logs(pod, &LogParams::default()).await
    }
}
