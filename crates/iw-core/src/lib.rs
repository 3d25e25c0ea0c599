//! Core types for Inkwell: story documents, where they come from, and the
//! contract a story engine must satisfy.
//!
//! Inkwell does not interpret stories itself. A [`StoryEngine`] turns a parsed
//! [`StoryDocument`] into a [`StorySession`], and everything above this crate
//! only drives that session: drain text, offer choices, select one, repeat.

/// Player-selectable branch options.
pub mod choice;
/// Parsed story documents.
pub mod document;
/// The story engine and session contract.
pub mod engine;
/// Error taxonomy shared by loaders, runners, and front ends.
pub mod error;
/// Bladeink-backed engine.
#[cfg(feature = "ink")]
pub mod ink;
/// Where a story document is read from.
pub mod source;
/// Scripted engine for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export choice types.
pub use choice::Choice;
/// Re-export document types.
pub use document::StoryDocument;
/// Re-export the engine contract.
pub use engine::{StoryEngine, StorySession, available_engine};
/// Re-export error types.
pub use error::{EngineError, InitError, LoadError, LoadErrorKind, StoryError, StoryResult};
/// Re-export story sources.
pub use source::{DEFAULT_STORY_PATH, StorySource};
