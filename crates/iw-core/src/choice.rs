//! A player-selectable branch option.

use std::fmt;

/// One entry in the current choice list, identified by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Position in the list the engine returned; passed back on selection.
    pub index: usize,
    /// Label shown to the player.
    pub text: String,
}

impl Choice {
    /// Create a choice at `index` with the given label.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Build an indexed choice list from labels, in order.
    pub fn list<I, T>(labels: I) -> Vec<Choice>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(index, text)| Choice::new(index, text))
            .collect()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.index + 1, self.text)
    }
}
