//! Error types for the CLI

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A runner operation failed
    #[error(transparent)]
    Runner(#[from] kjob_runner::Error),

    /// The kube client could not be built
    #[error("failed to create kubernetes client: {message}")]
    Client {
        /// What went wrong
        message: String,
    },

    /// An `--env` value was not NAME=VALUE
    #[error("invalid environment variable '{0}', expected NAME=VALUE")]
    InvalidEnv(String),
}

impl Error {
    /// Client construction failure
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client {
            message: message.into(),
        }
    }
}
