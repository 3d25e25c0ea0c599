//! Error types for the runner crate.

use thiserror::Error;

/// Result type for runner setup.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors raised before a story page exists.
///
/// Story failures never show up here; a page reports those on its surface.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The async runtime could not be started.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
