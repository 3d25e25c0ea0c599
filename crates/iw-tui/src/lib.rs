//! Terminal UI for Inkwell stories.
//!
//! A single ratatui screen over a [`iw_runner::StoryPage`]: engine line,
//! error banner, story text, choice list and status bar.

pub mod app;
pub mod terminal;
