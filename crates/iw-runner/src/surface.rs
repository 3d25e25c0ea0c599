//! Presentation surfaces: where story text, choices, status, and errors go.
//!
//! A surface has four regions. The text and choice regions are always
//! rebuilt from scratch by the runner; the status line and error banner are
//! overwritten in place.

use std::fmt::Write as _;

use iw_core::Choice;

use crate::report::Remediation;

/// One block in the story text region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    /// A text unit produced by the story.
    Paragraph(String),
    /// A non-fatal diagnostic, such as a story that produced no text.
    Warning(String),
    /// The terminal "story ended" marker.
    EndMarker(String),
    /// An error message replacing the story text.
    Error(String),
    /// Troubleshooting steps and a reload affordance.
    Help(Remediation),
}

/// The regions a story page renders into.
pub trait PresentationSurface {
    /// Remove every block from the text region.
    fn clear_text(&mut self);

    /// Append a block to the text region.
    fn push_text(&mut self, block: TextBlock);

    /// Remove every control from the choice region.
    fn clear_choices(&mut self);

    /// Append one control to the choice region.
    fn push_choice(&mut self, choice: Choice);

    /// Overwrite the status line.
    fn set_status(&mut self, line: String);

    /// Overwrite the engine version line.
    fn set_version(&mut self, line: String);

    /// Show the error banner with `message`, or hide it with `None`.
    fn set_error_banner(&mut self, message: Option<String>);
}

/// In-memory surface that front ends draw from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSurface {
    text: Vec<TextBlock>,
    choices: Vec<Choice>,
    status: String,
    version: String,
    error_banner: Option<String>,
}

impl PageSurface {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks in the text region, in order.
    pub fn text(&self) -> &[TextBlock] {
        &self.text
    }

    /// Controls in the choice region, in order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current engine version line.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Error banner text, when visible.
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Story paragraphs only, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.iter().filter_map(|b| match b {
            TextBlock::Paragraph(p) => Some(p.as_str()),
            _ => None,
        })
    }

    /// Whether the "story ended" marker is showing.
    pub fn has_end_marker(&self) -> bool {
        self.text
            .iter()
            .any(|b| matches!(b, TextBlock::EndMarker(_)))
    }

    /// Whether the "empty content" warning is showing.
    pub fn has_warning(&self) -> bool {
        self.text.iter().any(|b| matches!(b, TextBlock::Warning(_)))
    }

    /// Plain-text rendering of the text and choice regions.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for block in &self.text {
            match block {
                TextBlock::Paragraph(p) => {
                    let _ = writeln!(out, "{p}");
                }
                TextBlock::Warning(w) => {
                    let _ = writeln!(out, "! {w}");
                }
                TextBlock::EndMarker(m) => {
                    let _ = writeln!(out, "== {m} ==");
                }
                TextBlock::Error(e) => {
                    let _ = writeln!(out, "ERROR: {e}");
                }
                TextBlock::Help(help) => {
                    let _ = writeln!(out, "{}", help.heading);
                    for (i, step) in help.steps.iter().enumerate() {
                        let _ = writeln!(out, "  {}. {step}", i + 1);
                    }
                    let _ = writeln!(out, "[{}]", help.reload_label);
                }
            }
        }
        for choice in &self.choices {
            let _ = writeln!(out, "{choice}");
        }
        out
    }
}

impl PresentationSurface for PageSurface {
    fn clear_text(&mut self) {
        self.text.clear();
    }

    fn push_text(&mut self, block: TextBlock) {
        self.text.push(block);
    }

    fn clear_choices(&mut self) {
        self.choices.clear();
    }

    fn push_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    fn set_status(&mut self, line: String) {
        self.status = line;
    }

    fn set_version(&mut self, line: String) {
        self.version = line;
    }

    fn set_error_banner(&mut self, message: Option<String>) {
        self.error_banner = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_start_empty() {
        let page = PageSurface::new();
        assert!(page.text().is_empty());
        assert!(page.choices().is_empty());
        assert!(page.status().is_empty());
        assert!(page.error_banner().is_none());
    }

    #[test]
    fn transcript_lists_blocks_then_choices() {
        let mut page = PageSurface::new();
        page.push_text(TextBlock::Paragraph("Hello.".into()));
        page.push_text(TextBlock::Warning("odd".into()));
        page.push_choice(Choice::new(0, "Left"));
        page.push_choice(Choice::new(1, "Right"));
        assert_eq!(page.transcript(), "Hello.\n! odd\n[1] Left\n[2] Right\n");
    }

    #[test]
    fn banner_can_be_hidden_again() {
        let mut page = PageSurface::new();
        page.set_error_banner(Some("boom".into()));
        assert_eq!(page.error_banner(), Some("boom"));
        page.set_error_banner(None);
        assert!(page.error_banner().is_none());
    }
}
