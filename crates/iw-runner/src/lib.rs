//! Story loading, rendering, and the page controller for Inkwell.
//!
//! A [`StoryPage`] checks that an engine is available, fetches the story
//! document with a [`StoryLoader`], starts a session, and hands it to a
//! [`StoryRunner`] that renders text and choices onto a
//! [`PresentationSurface`]. Front ends draw the surface and forward choice
//! selections back to the page.

/// Page configuration.
pub mod config;
/// Error types for runner setup.
pub mod error;
/// Engine check and story document loading.
pub mod loader;
/// The page controller.
pub mod page;
/// Status line and error reporting.
pub mod report;
/// The render/interaction loop.
pub mod runner;
/// Presentation surfaces.
pub mod surface;

pub use config::PageConfig;
pub use error::{RunnerError, RunnerResult};
pub use loader::{StoryLoader, check_engine};
pub use page::{PagePhase, StoryPage, page_runtime};
pub use report::{Remediation, show_error, update_status};
pub use runner::{EMPTY_CONTENT_WARNING, END_MARKER, RenderOutcome, RenderState, StoryRunner};
pub use surface::{PageSurface, PresentationSurface, TextBlock};
