//! Error taxonomy for loading, starting, and playing a story.
//!
//! Every variant is caught at the boundary nearest its origin and shown to
//! the player as a single message; none of them abort the process.

use thiserror::Error;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// A fault raised by a story engine while a session is running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Wrap an engine-provided message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The engine refused to build a session from a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("story initialization failed: {detail}")]
pub struct InitError {
    /// Why the engine rejected the document.
    pub detail: String,
}

impl InitError {
    /// Create an initialization error with the given detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// What went wrong while reading a story document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadErrorKind {
    /// The file or URL does not exist.
    #[error("file not found")]
    NotFound,
    /// The server answered with a non-success status other than 404.
    #[error("HTTP status {0}")]
    HttpError(u16),
    /// The request could not be completed (connection, timeout, I/O).
    #[error("could not read ({0})")]
    Transport(String),
    /// The body was read but is not valid JSON.
    #[error("not valid JSON ({0})")]
    ParseError(String),
}

/// A story document could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {path}")]
pub struct LoadError {
    /// The failure category.
    pub kind: LoadErrorKind,
    /// The path or URL that was requested.
    pub path: String,
}

impl LoadError {
    /// Create a load error for `path`.
    pub fn new(kind: LoadErrorKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// The path or URL is missing.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::NotFound, path)
    }

    /// Whether the document simply does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == LoadErrorKind::NotFound
    }
}

/// Every way a story page can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    /// No story engine is compiled in or registered.
    #[error("story engine is not available; rebuild with an engine enabled")]
    EngineUnavailable,

    /// The story document could not be fetched or parsed.
    #[error("failed to load story: {0}")]
    Load(#[from] LoadError),

    /// The engine rejected the story document.
    #[error(transparent)]
    Init(#[from] InitError),

    /// The engine faulted while advancing or selecting.
    #[error("story engine error: {0}")]
    Render(#[from] EngineError),

    /// A selection outside the current choice list.
    #[error("invalid choice {index}: {available} choices available")]
    InvalidChoice {
        /// The requested position.
        index: usize,
        /// How many choices were on offer.
        available: usize,
    },
}

impl StoryError {
    /// The load failure behind this error, if any.
    pub fn as_load(&self) -> Option<&LoadError> {
        match self {
            Self::Load(e) => Some(e),
            _ => None,
        }
    }
}
