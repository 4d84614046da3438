//! Job lifecycle controller
//!
//! A [`JobRunner`] owns nothing but an immutable scope, namespace and client
//! handle. Every operation is an independent round trip to the API server;
//! ownership is decided from labels on each call, never cached.

use kube::{Client, ResourceExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::client::{Deletion, JobClient, KubeJobClient};
use crate::error::{Error, Result};
use crate::job::{build_job, is_finished, RunOption};
use crate::labels::LabelScheme;
use crate::poll::{poll_until, PollError, WaitConfig};

/// Submits, tracks and reclaims the jobs owned by one scope in one namespace
pub struct JobRunner<C = KubeJobClient> {
    client: C,
    namespace: String,
    labels: LabelScheme,
    wait: WaitConfig,
}

impl JobRunner<KubeJobClient> {
    /// Create a runner over a kube client.
    ///
    /// An empty `scope` falls back to [`DEFAULT_SCOPE`](crate::DEFAULT_SCOPE).
    pub fn new(scope: impl Into<String>, client: Client, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let client = KubeJobClient::new(client, &namespace);
        Self::with_client(scope, client, namespace)
    }
}

impl<C: JobClient> JobRunner<C> {
    /// Create a runner over any [`JobClient`] already scoped to `namespace`
    pub fn with_client(scope: impl Into<String>, client: C, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            labels: LabelScheme::new(scope),
            wait: WaitConfig::default(),
        }
    }

    /// Override the wait cadence and ceiling
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// The owning scope
    pub fn scope(&self) -> &str {
        self.labels.scope()
    }

    /// The namespace jobs are created in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Wait cadence and ceiling
    pub fn wait_config(&self) -> WaitConfig {
        self.wait
    }

    /// Create a job for `opt`.
    ///
    /// Rejections from the API server (name collision, invalid spec, quota)
    /// are returned as [`Error::Submission`] without retry.
    #[instrument(skip(self, opt), fields(job = %opt.name, scope = %self.scope()))]
    pub async fn submit(&self, opt: &RunOption) -> Result<()> {
        let job = build_job(opt, &self.namespace, self.labels.for_job(&opt.name));

        self.client
            .create_job(&job)
            .await
            .map_err(|source| Error::Submission {
                name: opt.name.clone(),
                source,
            })?;

        info!(
            namespace = %self.namespace,
            image = %opt.image,
            replicas = opt.effective_replicas(),
            "submitted job"
        );
        Ok(())
    }

    /// Names of all jobs owned by this scope, in API server order
    pub async fn list(&self) -> Result<Vec<String>> {
        let jobs = self
            .client
            .list_jobs(&self.labels.ownership_selector())
            .await
            .map_err(Error::query("list jobs"))?;
        Ok(jobs.iter().map(|job| job.name_any()).collect())
    }

    /// Whether `name` exists and is owned by this scope.
    ///
    /// A job owned by another scope reports `false`, the same as an absent one.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let job = self
            .client
            .get_job(name)
            .await
            .map_err(Error::query("get job"))?;

        Ok(match job {
            Some(job) => self.labels.owns(job.metadata.labels.as_ref()),
            None => false,
        })
    }

    /// Delete an owned job; its pods are removed in the background
    #[instrument(skip(self), fields(scope = %self.scope()))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name).await? {
            return Err(Error::not_exists(name));
        }

        match self
            .client
            .delete_job(name)
            .await
            .map_err(Error::query("delete job"))?
        {
            Deletion::Accepted => {
                info!(job = %name, namespace = %self.namespace, "deleted job");
                Ok(())
            }
            Deletion::NotFound => Err(Error::not_exists(name)),
        }
    }

    /// Block until the job has a completion timestamp.
    ///
    /// Polls at the configured interval. A missing job ends the wait with
    /// [`Error::NotExists`]; any other failure ends it immediately. Dropping
    /// the returned future stops polling.
    #[instrument(skip(self), fields(scope = %self.scope()))]
    pub async fn wait(&self, name: &str) -> Result<()> {
        let client = &self.client;

        let result = poll_until(self.wait, move || async move {
            match client.get_job(name).await {
                Ok(Some(job)) => {
                    let finished = is_finished(&job);
                    debug!(job = %name, finished, "polled job");
                    Ok(finished)
                }
                Ok(None) => Err(Error::not_exists(name)),
                Err(e) => Err(Error::query("get job")(e)),
            }
        })
        .await;

        match result {
            Ok(()) => {
                info!(job = %name, "job completed");
                Ok(())
            }
            Err(PollError::Check(e)) => Err(e),
            Err(PollError::TimedOut) => Err(Error::Timeout {
                name: name.to_string(),
                timeout: self.wait.timeout,
            }),
        }
    }

    /// [`wait`](Self::wait), returning [`Error::Cancelled`] as soon as `cancel` fires
    pub async fn wait_with_cancel(&self, name: &str, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            result = self.wait(name) => result,
            _ = cancel.cancelled() => {
                info!(job = %name, "wait cancelled");
                Err(Error::Cancelled { name: name.to_string() })
            }
        }
    }

    /// Delete every finished job owned by this scope.
    ///
    /// Running jobs are never touched. Deletes are issued one at a time and
    /// the first failure aborts the sweep. A job that vanished between list
    /// and delete is skipped. Returns the number of deletes accepted.
    #[instrument(skip(self), fields(scope = %self.scope()))]
    pub async fn cleanup(&self) -> Result<usize> {
        let jobs = self
            .client
            .list_jobs(&self.labels.ownership_selector())
            .await
            .map_err(Error::query("list jobs"))?;

        let mut deleted = 0;
        for job in jobs.iter().filter(|job| is_finished(job)) {
            let name = job.name_any();
            match self
                .client
                .delete_job(&name)
                .await
                .map_err(Error::query("delete job"))?
            {
                Deletion::Accepted => {
                    debug!(job = %name, "deleted finished job");
                    deleted += 1;
                }
                Deletion::NotFound => warn!(job = %name, "finished job already deleted"),
            }
        }

        info!(
            namespace = %self.namespace,
            listed = jobs.len(),
            deleted,
            "cleanup complete"
        );
        Ok(deleted)
    }

    /// Full log output of the first pod of an owned job
    pub async fn logs(&self, name: &str) -> Result<String> {
        let pods = self
            .client
            .list_pods(&self.labels.job_selector(name))
            .await
            .map_err(Error::query("list pods"))?;

        let pod = pods.first().ok_or_else(|| Error::not_exists(name))?;

        self.client
            .pod_logs(&pod.name_any())
            .await
            .map_err(Error::query("get pod logs"))
    }
}
