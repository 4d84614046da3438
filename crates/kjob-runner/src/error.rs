//! Error types for job lifecycle operations
//!
//! Orchestrator failures are carried verbatim as the underlying `kube::Error`;
//! the runner never reinterprets them. Absence and timeout are modelled as
//! their own variants so callers can match on them without inspecting text.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using the runner's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`JobRunner`](crate::JobRunner) operations
#[derive(Debug, Error)]
pub enum Error {
    /// The job is absent, or present but owned by another scope
    #[error("job {name} does not exist")]
    NotExists {
        /// Name of the job that was looked up
        name: String,
    },

    /// Wait did not observe completion before its ceiling elapsed
    #[error("timed out after {timeout:?} waiting for job {name} to complete")]
    Timeout {
        /// Name of the job being waited on
        name: String,
        /// The ceiling that elapsed
        timeout: Duration,
    },

    /// The orchestrator rejected a create request
    #[error("submission of job {name} rejected: {source}")]
    Submission {
        /// Name of the job being submitted
        name: String,
        /// The verbatim rejection
        source: kube::Error,
    },

    /// Any other orchestrator read or write failure
    #[error("{operation} failed: {source}")]
    Query {
        /// Operation that failed (e.g. "list jobs", "get pod logs")
        operation: &'static str,
        /// The verbatim failure
        source: kube::Error,
    },

    /// Wait was cancelled by the caller before completion was observed
    #[error("wait for job {name} cancelled")]
    Cancelled {
        /// Name of the job being waited on
        name: String,
    },
}

impl Error {
    pub(crate) fn not_exists(name: impl Into<String>) -> Self {
        Self::NotExists { name: name.into() }
    }

    pub(crate) fn query(operation: &'static str) -> impl FnOnce(kube::Error) -> Self {
        move |source| Self::Query { operation, source }
    }

    /// True if this is [`Error::NotExists`]
    pub fn is_not_exists(&self) -> bool {
        matches!(self, Self::NotExists { .. })
    }

    /// True if this is [`Error::Timeout`]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Check whether a kube error is the API server's structured 404 response
pub(crate) fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == 404)
}

#[cfg(test)]
pub(crate) mod test_support {
    use kube::error::ErrorResponse;

    /// Build a kube API error with the given status code and reason
    pub fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} ({})", reason, code),
            reason: reason.to_string(),
            code,
        })
    }
}
