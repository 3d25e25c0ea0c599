//! Story engine backed by the `bladeink` runtime for compiled ink JSON.

use bladeink::story::Story;

use crate::choice::Choice;
use crate::document::StoryDocument;
use crate::engine::{StoryEngine, StorySession};
use crate::error::{EngineError, InitError};

/// Highest compiled ink format the runtime understands.
const INK_FORMAT_VERSION: u64 = 21;

/// Engine for compiled ink stories.
#[derive(Debug, Default, Clone, Copy)]
pub struct InkEngine;

impl InkEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl StoryEngine for InkEngine {
    fn name(&self) -> &str {
        "bladeink"
    }

    fn version(&self) -> String {
        format!("ink format {INK_FORMAT_VERSION}")
    }

    fn start(&self, document: StoryDocument) -> Result<Box<dyn StorySession>, InitError> {
        if let Some(version) = document.ink_version()
            && version > INK_FORMAT_VERSION
        {
            return Err(InitError::new(format!(
                "ink format {version} is newer than supported ({INK_FORMAT_VERSION})"
            )));
        }
        let json = document.to_json_string();
        let story = Story::new(&json).map_err(|e| InitError::new(e.to_string()))?;
        Ok(Box::new(InkSession { story }))
    }
}

struct InkSession {
    story: Story,
}

impl StorySession for InkSession {
    fn can_continue(&self) -> bool {
        self.story.can_continue()
    }

    fn continue_story(&mut self) -> Result<String, EngineError> {
        let line = self
            .story
            .cont()
            .map_err(|e| EngineError::new(e.to_string()))?;
        // ink terminates every line with a newline.
        Ok(line.trim_end_matches('\n').to_string())
    }

    fn current_choices(&self) -> Vec<Choice> {
        self.story
            .get_current_choices()
            .iter()
            .enumerate()
            .map(|(index, choice)| Choice::new(index, choice.text.clone()))
            .collect()
    }

    fn choose(&mut self, index: usize) -> Result<(), EngineError> {
        self.story
            .choose_choice_index(index)
            .map_err(|e| EngineError::new(e.to_string()))
    }
}
