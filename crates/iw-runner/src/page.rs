//! The top-level page controller.
//!
//! A page owns the surface, the optional engine, and at most one live
//! runner. Booting walks engine check, fetch, session start, and first
//! render; any failure along the way is shown on the surface and leaves the
//! page in [`PagePhase::Failed`] until the player reloads.

use iw_core::{EngineError, StoryEngine, StoryError};
use tokio::runtime::Runtime;
use tracing::instrument;

use crate::config::PageConfig;
use crate::error::RunnerResult;
use crate::loader::{StoryLoader, check_engine};
use crate::report::{show_error, update_status};
use crate::runner::{RenderOutcome, RenderState, StoryRunner};
use crate::surface::PresentationSurface;

/// Where the page is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePhase {
    /// Not booted yet, or a boot is in progress.
    Booting,
    /// Choices are on screen.
    AwaitingChoice,
    /// The story reached its end.
    Ended,
    /// An error is on screen; only a reload helps.
    Failed(StoryError),
}

/// A single story page.
pub struct StoryPage<S> {
    config: PageConfig,
    engine: Option<Box<dyn StoryEngine>>,
    loader: StoryLoader,
    surface: S,
    runner: Option<StoryRunner>,
    phase: PagePhase,
}

impl<S: PresentationSurface> StoryPage<S> {
    /// Create an unbooted page.
    pub fn new(config: PageConfig, engine: Option<Box<dyn StoryEngine>>, surface: S) -> Self {
        let loader = StoryLoader::new(config.fetch_timeout());
        Self {
            config,
            engine,
            loader,
            surface,
            runner: None,
            phase: PagePhase::Booting,
        }
    }

    /// The page configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The presentation surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &PagePhase {
        &self.phase
    }

    /// Whether a story session is live.
    pub fn has_session(&self) -> bool {
        self.runner.is_some()
    }

    /// Load the story and render it for the first time.
    ///
    /// Never fails: errors end up on the surface and in [`Self::phase`].
    #[instrument(skip_all, fields(story = %self.config.story))]
    pub async fn boot(&mut self) -> &PagePhase {
        self.runner = None;
        self.phase = PagePhase::Booting;
        match self.try_boot().await {
            Ok(outcome) => self.settle(outcome),
            Err(error) => self.fail(error),
        }
        &self.phase
    }

    async fn try_boot(&mut self) -> Result<RenderOutcome, StoryError> {
        let engine = check_engine(self.engine.as_deref(), &mut self.surface)?;
        let document = self
            .loader
            .load(&self.config.story, &mut self.surface)
            .await?;

        update_status(&mut self.surface, "creating story session");
        let mut runner = StoryRunner::start(engine, document)?;
        let outcome = runner.render(&mut self.surface)?;
        self.runner = Some(runner);
        Ok(outcome)
    }

    /// Handle the player picking the choice at `index`.
    ///
    /// Ignored unless choices are on screen. An out-of-range index only
    /// updates the status line; engine faults fail the page.
    pub fn select(&mut self, index: usize) -> &PagePhase {
        if self.phase != PagePhase::AwaitingChoice {
            tracing::debug!(index, phase = ?self.phase, "selection ignored");
            return &self.phase;
        }
        let Some(runner) = self.runner.as_mut() else {
            return &self.phase;
        };
        match runner.select(index, &mut self.surface) {
            Ok(outcome) => self.settle(outcome),
            Err(error @ StoryError::InvalidChoice { .. }) => {
                tracing::warn!("{error}");
                update_status(&mut self.surface, &error.to_string());
            }
            Err(error) => self.fail(error),
        }
        &self.phase
    }

    /// Throw away the session and everything on screen, then boot again.
    pub async fn reload(&mut self) -> &PagePhase {
        tracing::info!("reloading story page");
        self.runner = None;
        self.surface.clear_text();
        self.surface.clear_choices();
        self.surface.set_error_banner(None);
        self.boot().await
    }

    fn settle(&mut self, outcome: RenderOutcome) {
        self.phase = match outcome.state {
            RenderState::AwaitingChoice { .. } => PagePhase::AwaitingChoice,
            RenderState::Ended => PagePhase::Ended,
            RenderState::Stalled => {
                self.fail(StoryError::Render(EngineError::new(
                    "engine reported more content but produced none",
                )));
                return;
            }
        };
    }

    fn fail(&mut self, error: StoryError) {
        show_error(&mut self.surface, &error);
        self.runner = None;
        self.phase = PagePhase::Failed(error);
    }
}

/// Build the single-threaded runtime a page's fetch runs on.
pub fn page_runtime() -> RunnerResult<Runtime> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use iw_core::StorySource;
    use iw_core::testing::{Script, ScriptedEngine, StallingEngine};

    use super::*;
    use crate::surface::PageSurface;

    fn page_for(script: &Script) -> (StoryPage<PageSurface>, ScriptedEngine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("story.json");
        std::fs::write(&file, script.to_document().to_json_string()).unwrap();
        let engine = ScriptedEngine::new();
        let config = PageConfig::default().with_story(StorySource::Path(file));
        let page = StoryPage::new(config, Some(Box::new(engine.clone())), PageSurface::new());
        (page, engine, dir)
    }

    #[tokio::test]
    async fn boot_renders_first_beat() {
        let script = Script::new().beat(["Hello."], [("On", None)]);
        let (mut page, _, _dir) = page_for(&script);

        assert_eq!(page.boot().await, &PagePhase::AwaitingChoice);
        assert!(page.has_session());
        assert_eq!(page.surface().version(), "scripted 1.0");
        assert_eq!(page.surface().choices().len(), 1);
    }

    #[tokio::test]
    async fn select_before_boot_is_ignored() {
        let script = Script::new().beat(["Hello."], [("On", None)]);
        let (mut page, engine, _dir) = page_for(&script);

        assert_eq!(page.select(0), &PagePhase::Booting);
        assert!(engine.log().selections.is_empty());
    }

    #[tokio::test]
    async fn invalid_choice_keeps_page_alive() {
        let script = Script::new().beat(["Hello."], [("On", None)]);
        let (mut page, _, _dir) = page_for(&script);
        page.boot().await;

        assert_eq!(page.select(4), &PagePhase::AwaitingChoice);
        assert!(page.surface().status().contains("invalid choice 4"));
        assert!(page.surface().error_banner().is_none());
        assert_eq!(page.surface().choices().len(), 1);
    }

    #[tokio::test]
    async fn engine_fault_during_selection_fails_page() {
        let script = Script::new()
            .beat(["One."], [("Next", Some(1))])
            .beat(["Two.", "Three."], [])
            .with_fault_after(2);
        let (mut page, _, _dir) = page_for(&script);
        page.boot().await;

        let phase = page.select(0).clone();

        assert!(matches!(phase, PagePhase::Failed(StoryError::Render(_))));
        assert!(!page.has_session());
        assert!(page.surface().choices().is_empty());
        assert!(page.surface().error_banner().is_some());
        assert_eq!(page.select(0), &phase);
    }

    #[tokio::test]
    async fn reload_starts_a_fresh_session() {
        let script = Script::new().beat(["Start."], [("End it", None)]);
        let (mut page, engine, _dir) = page_for(&script);
        page.boot().await;
        assert_eq!(page.select(0), &PagePhase::Ended);

        assert_eq!(page.reload().await, &PagePhase::AwaitingChoice);
        assert_eq!(engine.log().sessions, 2);
        assert_eq!(page.surface().paragraphs().collect::<Vec<_>>(), vec!["Start."]);
        assert!(!page.surface().has_end_marker());
    }

    #[tokio::test]
    async fn stalled_render_fails_page() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("story.json");
        let document = Script::new().beat(["unused"], []).to_document();
        std::fs::write(&file, document.to_json_string()).unwrap();
        let config = PageConfig::default().with_story(StorySource::Path(file));
        let mut page = StoryPage::new(config, Some(Box::new(StallingEngine)), PageSurface::new());

        let phase = page.boot().await.clone();

        assert!(matches!(phase, PagePhase::Failed(StoryError::Render(_))));
        assert!(!page.has_session());
        assert!(!page.surface().has_end_marker());
        assert!(page.surface().error_banner().is_some());
    }

    #[test]
    fn runtime_drives_boot() {
        let script = Script::new().beat(["Hi."], []);
        let (mut page, _, _dir) = page_for(&script);
        let runtime = page_runtime().unwrap();
        assert_eq!(runtime.block_on(page.boot()), &PagePhase::Ended);
    }
}
