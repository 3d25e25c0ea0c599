//! Application state: the story page plus what the screen needs on top of it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use iw_core::StoryEngine;
use iw_runner::{PageConfig, PagePhase, PageSurface, StoryPage, page_runtime};
use tokio::runtime::Runtime;

/// Main application state for the story screen.
pub struct TuiApp {
    page: StoryPage<PageSurface>,
    runtime: Runtime,
    /// Highlighted entry in the choice list.
    pub selected: usize,
    /// Lines scrolled up from the bottom of the story text.
    pub scroll: u16,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Create the app. Nothing is loaded until [`Self::boot`].
    pub fn new(config: PageConfig, engine: Option<Box<dyn StoryEngine>>) -> Result<Self, String> {
        let runtime = page_runtime().map_err(|e| e.to_string())?;
        Ok(Self {
            page: StoryPage::new(config, engine, PageSurface::new()),
            runtime,
            selected: 0,
            scroll: 0,
            should_quit: false,
        })
    }

    /// The story page being shown.
    pub fn page(&self) -> &StoryPage<PageSurface> {
        &self.page
    }

    /// The page's presentation state.
    pub fn surface(&self) -> &PageSurface {
        self.page.surface()
    }

    /// Load the story and render its opening.
    pub fn boot(&mut self) {
        self.runtime.block_on(self.page.boot());
        self.reset_view();
    }

    /// Drop the session and load the story again.
    pub fn reload(&mut self) {
        self.runtime.block_on(self.page.reload());
        self.reset_view();
    }

    /// Pick the choice at `index` (zero-based).
    pub fn choose(&mut self, index: usize) {
        if *self.page.phase() != PagePhase::AwaitingChoice {
            return;
        }
        tracing::debug!(index, "choice picked");
        let valid = index < self.page.surface().choices().len();
        self.page.select(index);
        if valid {
            self.reset_view();
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let choices = self.page.surface().choices().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < choices {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if choices > 0 {
                    self.choose(self.selected);
                }
            }
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10).filter(|n| *n > 0) {
                    self.choose(n as usize - 1);
                }
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_sub(5),
            _ => {}
        }
    }

    /// One-line hint for the status bar.
    pub fn key_hint(&self) -> &'static str {
        match self.page.phase() {
            PagePhase::AwaitingChoice => {
                "1-9/Enter:choose  \u{2191}\u{2193}:move  PgUp/PgDn:scroll  r:reload  q:quit"
            }
            PagePhase::Failed(_) => "r:reload  q:quit",
            _ => "PgUp/PgDn:scroll  r:reload  q:quit",
        }
    }

    fn reset_view(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use iw_core::StorySource;
    use iw_core::testing::{Script, ScriptedEngine};
    use iw_runner::TextBlock;
    use tempfile::TempDir;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn story(script: &Script) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("test1.json");
        std::fs::write(&file, script.to_document().to_json_string()).unwrap();
        (dir, file)
    }

    fn booted(file: PathBuf) -> TuiApp {
        let config = PageConfig::default().with_story(StorySource::Path(file));
        let mut app = TuiApp::new(config, Some(Box::new(ScriptedEngine::new()))).unwrap();
        app.boot();
        app
    }

    fn fork() -> Script {
        Script::new()
            .beat(["A fork."], [("Left", Some(1)), ("Right", Some(2))])
            .beat(["Trees."], [])
            .beat(["A river."], [])
    }

    #[test]
    fn boot_shows_opening_choices() {
        let (_dir, file) = story(&fork());
        let app = booted(file);
        assert_eq!(app.page().phase(), &PagePhase::AwaitingChoice);
        assert_eq!(app.surface().choices().len(), 2);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn number_key_picks_choice() {
        let (_dir, file) = story(&fork());
        let mut app = booted(file);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.surface().paragraphs().collect::<Vec<_>>(), ["A river."]);
        assert_eq!(app.page().phase(), &PagePhase::Ended);
    }

    #[test]
    fn arrows_move_highlight_and_enter_picks_it() {
        let (_dir, file) = story(&fork());
        let mut app = booted(file);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 1);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.surface().paragraphs().collect::<Vec<_>>(), ["Trees."]);
    }

    #[test]
    fn out_of_range_number_keeps_story() {
        let (_dir, file) = story(&fork());
        let mut app = booted(file);
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.page().phase(), &PagePhase::AwaitingChoice);
        assert_eq!(app.surface().paragraphs().collect::<Vec<_>>(), ["A fork."]);
        assert!(app.surface().status().contains("invalid choice"));
    }

    #[test]
    fn reload_recovers_after_fix() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("test1.json");
        let mut app = booted(file.clone());
        assert!(matches!(app.page().phase(), PagePhase::Failed(_)));
        assert!(matches!(app.surface().text()[0], TextBlock::Error(_)));

        std::fs::write(&file, fork().to_document().to_json_string()).unwrap();
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.page().phase(), &PagePhase::AwaitingChoice);
        assert!(app.surface().error_banner().is_none());
    }

    #[test]
    fn quit_keys() {
        let (_dir, file) = story(&fork());
        let mut app = booted(file);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (_dir, file) = story(&fork());
        let mut app = booted(file);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn engine_missing_fails_page() {
        let (_dir, file) = story(&fork());
        let config = PageConfig::default().with_story(StorySource::Path(file));
        let mut app = TuiApp::new(config, None).unwrap();
        app.boot();
        assert!(matches!(app.page().phase(), PagePhase::Failed(_)));
        assert_eq!(app.key_hint(), "r:reload  q:quit");
    }
}
