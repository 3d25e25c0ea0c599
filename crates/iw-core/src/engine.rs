//! The contract between Inkwell and a story engine.
//!
//! An engine owns everything about the story graph: parsing it, tracking the
//! current position, and resolving choices. Inkwell only asks four questions
//! of a running session.

use crate::choice::Choice;
use crate::document::StoryDocument;
use crate::error::{EngineError, InitError};

/// A live story in progress.
pub trait StorySession {
    /// Whether another text unit can be produced right now.
    fn can_continue(&self) -> bool;

    /// Advance one unit and return its text.
    fn continue_story(&mut self) -> Result<String, EngineError>;

    /// The choices currently on offer, in display order.
    fn current_choices(&self) -> Vec<Choice>;

    /// Take the choice at `index` in [`Self::current_choices`].
    fn choose(&mut self, index: usize) -> Result<(), EngineError>;
}

/// Builds sessions from story documents.
pub trait StoryEngine {
    /// Short engine name shown next to the version.
    fn name(&self) -> &str;

    /// Engine version string.
    fn version(&self) -> String;

    /// Start a session. The document is consumed.
    fn start(&self, document: StoryDocument) -> Result<Box<dyn StorySession>, InitError>;
}

/// The engine compiled into this build, if any.
pub fn available_engine() -> Option<Box<dyn StoryEngine>> {
    #[cfg(feature = "ink")]
    {
        Some(Box::new(crate::ink::InkEngine::new()))
    }
    #[cfg(not(feature = "ink"))]
    {
        None
    }
}
