//! The render/interaction loop.
//!
//! Each render fully rebuilds the text and choice regions: drain every
//! available text unit, then offer the current choices or mark the end.
//! Selecting a choice is a plain call from the front end's event handler
//! that mutates the session and renders again.

use iw_core::{EngineError, InitError, StoryDocument, StoryEngine, StoryError, StorySession};
use tracing::instrument;

use crate::report::update_status;
use crate::surface::{PresentationSurface, TextBlock};

/// Shown when a render produced no story text.
pub const EMPTY_CONTENT_WARNING: &str =
    "The story produced no text; the file may not be a valid story.";

/// Shown once the story has nothing left to say or offer.
pub const END_MARKER: &str = "The End";

/// Where a session stands after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Choices are on offer; waiting for a selection.
    AwaitingChoice {
        /// Number of choices rendered.
        choices: usize,
    },
    /// No choices and no further content. Terminal.
    Ended,
    /// No choices, yet the engine reports more content right after draining.
    Stalled,
}

/// Summary of a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Text units appended by the drain loop.
    pub paragraphs: usize,
    /// State after rendering.
    pub state: RenderState,
}

/// Drives one story session.
pub struct StoryRunner {
    session: Box<dyn StorySession>,
    renders: u64,
}

impl StoryRunner {
    /// Build a session from `document`. The engine owns the document from here on.
    pub fn start(engine: &dyn StoryEngine, document: StoryDocument) -> Result<Self, InitError> {
        let session = engine.start(document)?;
        tracing::debug!(engine = engine.name(), "session started");
        Ok(Self {
            session,
            renders: 0,
        })
    }

    /// Number of renders performed so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Clear and repopulate the text and choice regions.
    #[instrument(skip_all, fields(render = self.renders + 1))]
    pub fn render<S>(&mut self, surface: &mut S) -> Result<RenderOutcome, EngineError>
    where
        S: PresentationSurface + ?Sized,
    {
        self.renders += 1;
        surface.clear_text();
        surface.clear_choices();
        update_status(surface, "rendering story");

        let mut paragraphs = 0;
        while self.session.can_continue() {
            let text = self.session.continue_story()?;
            surface.push_text(TextBlock::Paragraph(text));
            paragraphs += 1;
        }

        if paragraphs == 0 {
            tracing::warn!(
                "story produced no text; the file may be malformed, the story may have \
                 no opening text, or the JSON may not match what the engine expects"
            );
            surface.push_text(TextBlock::Warning(EMPTY_CONTENT_WARNING.to_string()));
        }

        let choices = self.session.current_choices();
        let state = if !choices.is_empty() {
            let count = choices.len();
            for choice in choices {
                surface.push_choice(choice);
            }
            update_status(surface, &format!("showing {count} choices"));
            RenderState::AwaitingChoice { choices: count }
        } else if !self.session.can_continue() {
            surface.push_text(TextBlock::EndMarker(END_MARKER.to_string()));
            update_status(surface, "story ended");
            RenderState::Ended
        } else {
            tracing::warn!("engine reports more content after draining");
            RenderState::Stalled
        };

        Ok(RenderOutcome { paragraphs, state })
    }

    /// Take the choice at `index`, then render again.
    #[instrument(skip(self, surface))]
    pub fn select<S>(&mut self, index: usize, surface: &mut S) -> Result<RenderOutcome, StoryError>
    where
        S: PresentationSurface + ?Sized,
    {
        let available = self.session.current_choices().len();
        if index >= available {
            return Err(StoryError::InvalidChoice { index, available });
        }
        self.session.choose(index)?;
        self.render(surface).map_err(StoryError::from)
    }
}
