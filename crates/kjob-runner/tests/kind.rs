//! End-to-end tests against a live Kubernetes cluster
//!
//! These tests require a reachable cluster (e.g. kind) with a `kjobrunner`
//! namespace and the `hello-world` and `busybox` images pullable. They are ignored by
//! default and can be run with:
//!
//! ```bash
//! kubectl create namespace kjobrunner
//! cargo test -p kjob-runner --test kind -- --ignored
//! ```

use kjob_runner::{JobRunner, RunOption};
use kube::Client;

const NAMESPACE: &str = "kjobrunner";

async fn runner(scope: &str) -> JobRunner {
    let client = Client::try_default()
        .await
        .expect("kubeconfig or in-cluster config should be available");
    JobRunner::new(scope, client, NAMESPACE)
}

/// Submit, observe, read and remove a single multi-replica job
#[tokio::test]
#[ignore]
async fn job_lifecycle() {
    let runner = runner("runner").await;

    assert!(!runner.exists("notexists").await.unwrap());

    runner
        .submit(&RunOption::new("hello", "hello-world").with_replicas(2))
        .await
        .unwrap();

    assert!(runner.exists("hello").await.unwrap());
    assert_eq!(runner.list().await.unwrap(), vec!["hello"]);

    runner.wait("hello").await.unwrap();

    let logs = runner.logs("hello").await.unwrap();
    assert!(logs.contains("Hello from Docker!"));

    runner.delete("hello").await.unwrap();
    assert!(runner.list().await.unwrap().is_empty());
}

/// A job from one scope is invisible to another scope in the same namespace
#[tokio::test]
#[ignore]
async fn scopes_do_not_see_each_other() {
    let owner = runner("scope-owner").await;
    let other = runner("scope-other").await;

    owner
        .submit(&RunOption::new("scoped", "hello-world"))
        .await
        .unwrap();

    assert!(owner.exists("scoped").await.unwrap());
    assert!(!other.exists("scoped").await.unwrap());
    assert!(other.delete("scoped").await.unwrap_err().is_not_exists());
    assert!(other.list().await.unwrap().is_empty());

    owner.delete("scoped").await.unwrap();
}

/// Cleanup removes finished jobs and leaves running ones
#[tokio::test]
#[ignore]
async fn cleanup_keeps_running_jobs() {
    let runner = runner("cleanup").await;

    runner
        .submit(&RunOption::new("hello-1", "hello-world"))
        .await
        .unwrap();
    runner
        .submit(&RunOption::new("hello-2", "hello-world"))
        .await
        .unwrap();

    runner.wait("hello-1").await.unwrap();
    runner.wait("hello-2").await.unwrap();

    // long-running so it is still active when cleanup sweeps
    runner
        .submit(&RunOption::new("hello-3", "busybox:1.36").with_args(["sleep", "600"]))
        .await
        .unwrap();

    runner.cleanup().await.unwrap();
    assert_eq!(runner.list().await.unwrap(), vec!["hello-3"]);

    // second sweep changes nothing
    runner.cleanup().await.unwrap();
    assert_eq!(runner.list().await.unwrap(), vec!["hello-3"]);

    runner.delete("hello-3").await.unwrap();
}
