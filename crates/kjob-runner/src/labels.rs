//! Ownership labels and selectors
//!
//! Every job a runner creates carries `scheduler=<scope>` and
//! `name=<job name>`. The base map is built once per runner and never
//! mutated; per-job label sets are fresh copies.

use std::collections::BTreeMap;

/// Label key holding the owning scope
pub const SCOPE_LABEL: &str = "scheduler";

/// Label key holding the job name
pub const NAME_LABEL: &str = "name";

/// Scope used when the caller passes an empty one
pub const DEFAULT_SCOPE: &str = "kjobrunner";

/// Kubernetes label map
pub type Labels = BTreeMap<String, String>;

/// Label scheme for a single scope
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelScheme {
    scope: String,
    base: Labels,
}

impl LabelScheme {
    /// Create the scheme for `scope`, falling back to [`DEFAULT_SCOPE`] when empty
    pub fn new(scope: impl Into<String>) -> Self {
        let mut scope = scope.into();
        if scope.is_empty() {
            scope = DEFAULT_SCOPE.to_string();
        }
        let base = ownership_labels(&scope);
        Self { scope, base }
    }

    /// The owning scope
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Base ownership labels
    pub fn ownership(&self) -> &Labels {
        &self.base
    }

    /// Labels for a specific job: a copy of the base plus the name label
    pub fn for_job(&self, name: &str) -> Labels {
        let mut labels = self.base.clone();
        labels.insert(NAME_LABEL.to_string(), name.to_string());
        labels
    }

    /// Selector matching every job owned by this scope
    pub fn ownership_selector(&self) -> String {
        selector(&self.base)
    }

    /// Selector matching the pods of one owned job
    pub fn job_selector(&self, name: &str) -> String {
        selector(&self.for_job(name))
    }

    /// True if `labels` mark the resource as owned by this scope
    pub fn owns(&self, labels: Option<&Labels>) -> bool {
        labels
            .and_then(|l| l.get(SCOPE_LABEL))
            .is_some_and(|owner| *owner == self.scope)
    }
}

/// Base label set for a scope
pub fn ownership_labels(scope: &str) -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(SCOPE_LABEL.to_string(), scope.to_string());
    labels
}

/// Render labels as an equality-based label selector (`k=v, k=v`)
pub fn selector(labels: &Labels) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}
