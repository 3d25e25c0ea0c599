//! A scripted story engine for exercising runners and front ends.
//!
//! Scripts are small JSON documents made of beats. Each beat has text units
//! that are produced in order, followed by choices that jump to another beat
//! (or end the story when `goto` is absent):
//!
//! ```json
//! { "beats": [
//!     { "text": ["Hello."], "choices": [{ "text": "Leave", "goto": 1 }] },
//!     { "text": ["Goodbye."] }
//! ] }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::document::StoryDocument;
use crate::engine::{StoryEngine, StorySession};
use crate::error::{EngineError, InitError};

/// A scripted story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Story beats; the session starts at the first.
    pub beats: Vec<Beat>,
    /// Fail the continue call made after this many text units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_after: Option<usize>,
}

/// Text produced before a decision point, and the choices offered there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Text units, in order.
    #[serde(default)]
    pub text: Vec<String>,
    /// Choices offered once the text is drained.
    #[serde(default)]
    pub choices: Vec<ScriptChoice>,
}

/// A scripted choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptChoice {
    /// Label shown to the player.
    pub text: String,
    /// Beat to jump to; `None` ends the story.
    #[serde(default)]
    pub goto: Option<usize>,
}

impl Script {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a beat with the given text units and `(label, goto)` choices.
    pub fn beat<T, C>(mut self, text: T, choices: C) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        C: IntoIterator<Item = (&'static str, Option<usize>)>,
    {
        self.beats.push(Beat {
            text: text.into_iter().map(Into::into).collect(),
            choices: choices
                .into_iter()
                .map(|(text, goto)| ScriptChoice {
                    text: text.to_string(),
                    goto,
                })
                .collect(),
        });
        self
    }

    /// Fail the continue call made after `units` text units.
    pub fn with_fault_after(mut self, units: usize) -> Self {
        self.fault_after = Some(units);
        self
    }

    /// Encode as a story document.
    pub fn to_document(&self) -> StoryDocument {
        StoryDocument::from_value(serde_json::to_value(self).unwrap_or_default())
    }
}

/// Calls observed by every session an engine started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptLog {
    /// Indices passed to `choose`, in call order.
    pub selections: Vec<usize>,
    /// Number of successful `continue_story` calls.
    pub continues: usize,
    /// Number of sessions started.
    pub sessions: usize,
}

/// Engine that plays [`Script`] documents.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    log: Rc<RefCell<ScriptLog>>,
}

impl ScriptedEngine {
    /// Create an engine with an empty call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls made so far.
    pub fn log(&self) -> ScriptLog {
        self.log.borrow().clone()
    }
}

impl StoryEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> String {
        "1.0".to_string()
    }

    fn start(&self, document: StoryDocument) -> Result<Box<dyn StorySession>, InitError> {
        let script: Script = serde_json::from_value(document.into_value())
            .map_err(|e| InitError::new(format!("missing root: {e}")))?;
        if script.beats.is_empty() {
            return Err(InitError::new("missing root: script has no beats"));
        }
        for (i, beat) in script.beats.iter().enumerate() {
            if let Some(target) = beat
                .choices
                .iter()
                .filter_map(|c| c.goto)
                .find(|t| *t >= script.beats.len())
            {
                return Err(InitError::new(format!(
                    "beat {i} jumps to missing beat {target}"
                )));
            }
        }
        self.log.borrow_mut().sessions += 1;
        Ok(Box::new(ScriptedSession {
            script,
            beat: Some(0),
            cursor: 0,
            produced: 0,
            log: Rc::clone(&self.log),
        }))
    }
}

struct ScriptedSession {
    script: Script,
    /// Current beat; `None` once a terminal choice was taken.
    beat: Option<usize>,
    cursor: usize,
    produced: usize,
    log: Rc<RefCell<ScriptLog>>,
}

impl ScriptedSession {
    fn current(&self) -> Option<&Beat> {
        self.beat.and_then(|b| self.script.beats.get(b))
    }
}

impl StorySession for ScriptedSession {
    fn can_continue(&self) -> bool {
        self.current().is_some_and(|beat| self.cursor < beat.text.len())
    }

    fn continue_story(&mut self) -> Result<String, EngineError> {
        if self.script.fault_after == Some(self.produced) {
            return Err(EngineError::new(format!(
                "scripted fault after {} units",
                self.produced
            )));
        }
        let text = self
            .current()
            .and_then(|beat| beat.text.get(self.cursor))
            .cloned()
            .ok_or_else(|| EngineError::new("no more content"))?;
        self.cursor += 1;
        self.produced += 1;
        self.log.borrow_mut().continues += 1;
        Ok(text)
    }

    fn current_choices(&self) -> Vec<Choice> {
        if self.can_continue() {
            return Vec::new();
        }
        self.current()
            .map(|beat| Choice::list(beat.choices.iter().map(|c| c.text.as_str())))
            .unwrap_or_default()
    }

    fn choose(&mut self, index: usize) -> Result<(), EngineError> {
        let goto = self
            .current()
            .and_then(|beat| beat.choices.get(index))
            .map(|choice| choice.goto)
            .ok_or_else(|| EngineError::new(format!("choice {index} out of range")))?;
        self.log.borrow_mut().selections.push(index);
        self.beat = goto;
        self.cursor = 0;
        Ok(())
    }
}

/// Engine whose sessions report more content only after a drain has
/// stopped asking, and never produce any.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallingEngine;

impl StoryEngine for StallingEngine {
    fn name(&self) -> &str {
        "stalling"
    }

    fn version(&self) -> String {
        "1.0".to_string()
    }

    fn start(&self, _document: StoryDocument) -> Result<Box<dyn StorySession>, InitError> {
        Ok(Box::new(StallingSession::default()))
    }
}

#[derive(Default)]
struct StallingSession {
    checks: Cell<usize>,
}

impl StorySession for StallingSession {
    fn can_continue(&self) -> bool {
        let seen = self.checks.get();
        self.checks.set(seen + 1);
        seen > 0
    }

    fn continue_story(&mut self) -> Result<String, EngineError> {
        Err(EngineError::new("no more content"))
    }

    fn current_choices(&self) -> Vec<Choice> {
        Vec::new()
    }

    fn choose(&mut self, index: usize) -> Result<(), EngineError> {
        Err(EngineError::new(format!("choice {index} out of range")))
    }
}
