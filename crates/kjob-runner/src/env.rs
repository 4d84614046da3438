//! Container environment builder
//!
//! Accumulates ordered name/value pairs and renders them into the container
//! `env` list. Pairs are emitted in insertion order; duplicate names are kept.

use k8s_openapi::api::core::v1::EnvVar;

/// Ordered list of environment variables for a job container
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envs {
    vars: Vec<(String, String)>,
}

impl Envs {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variable
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.push((name.into(), value.into()));
        self
    }

    /// Number of variables added
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True if no variables were added
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Render into container env vars, preserving insertion order
    pub fn env_vars(&self) -> Vec<EnvVar> {
        self.vars
            .iter()
            .map(|(name, value)| EnvVar {
                name: name.clone(),
                value: Some(value.clone()),
                value_from: None,
            })
            .collect()
    }
}

/// Render an optional builder; an absent builder renders to nothing
pub fn render(envs: Option<&Envs>) -> Vec<EnvVar> {
    envs.map(Envs::env_vars).unwrap_or_default()
}

impl<N, V> FromIterator<(N, V)> for Envs
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut envs = Envs::new();
        envs.extend(iter);
        envs
    }
}

impl<N, V> Extend<(N, V)> for Envs
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}
