//! Status and error reporting.
//!
//! The status line holds only the latest message. Errors replace the story
//! text, raise the banner, and for load failures add troubleshooting steps.
//! Nothing here retries; recovery is a manual reload.

use iw_core::StoryError;

use crate::surface::{PresentationSurface, TextBlock};

/// Troubleshooting steps shown under a load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// Heading above the steps.
    pub heading: String,
    /// Ordered checklist.
    pub steps: Vec<String>,
    /// Label of the reload control.
    pub reload_label: String,
}

impl Remediation {
    /// The fixed checklist for a story file that could not be loaded.
    pub fn for_story_file(path: &str) -> Self {
        Self {
            heading: "Troubleshooting:".to_string(),
            steps: vec![
                format!("Check that {path} exists"),
                "Check that the file name and path match exactly (case-sensitive)".to_string(),
                "Make sure the file is valid JSON".to_string(),
                "If you are opening local files, serve them from a local HTTP server instead"
                    .to_string(),
            ],
            reload_label: "Reload".to_string(),
        }
    }
}

/// Overwrite the status line and log it.
pub fn update_status<S>(surface: &mut S, message: &str)
where
    S: PresentationSurface + ?Sized,
{
    tracing::info!(target: "inkwell::status", "{message}");
    surface.set_status(format!("Status: {message}"));
}

/// Replace the page with `error`.
///
/// The text and choice regions are cleared, the error becomes the only text
/// block, and the banner is raised. Load failures also get the
/// troubleshooting checklist for the requested path.
pub fn show_error<S>(surface: &mut S, error: &StoryError)
where
    S: PresentationSurface + ?Sized,
{
    let message = error.to_string();
    match error {
        StoryError::Load(load) => {
            tracing::error!(path = %load.path, kind = ?load.kind, "{message}");
        }
        StoryError::Init(init) => {
            tracing::error!(detail = %init.detail, "{message}");
        }
        _ => tracing::error!("{message}"),
    }

    surface.clear_text();
    surface.clear_choices();
    surface.set_error_banner(Some(message.clone()));
    surface.push_text(TextBlock::Error(message.clone()));
    if let Some(load) = error.as_load() {
        surface.push_text(TextBlock::Help(Remediation::for_story_file(&load.path)));
    }
    update_status(surface, &format!("Error: {message}"));
}

#[cfg(test)]
mod tests {
    use iw_core::{Choice, InitError, LoadError};

    use super::*;
    use crate::surface::PageSurface;

    #[test]
    fn status_is_latest_write_wins() {
        let mut page = PageSurface::new();
        update_status(&mut page, "fetching");
        update_status(&mut page, "parsing");
        assert_eq!(page.status(), "Status: parsing");
    }

    #[test]
    fn load_error_replaces_page_and_adds_help() {
        let mut page = PageSurface::new();
        page.push_text(TextBlock::Paragraph("partial".into()));
        page.push_choice(Choice::new(0, "stale"));

        let err = StoryError::from(LoadError::not_found("stories/test1.json"));
        show_error(&mut page, &err);

        assert!(page.choices().is_empty());
        assert!(page.paragraphs().next().is_none());
        let banner = page.error_banner().unwrap();
        assert!(banner.contains("stories/test1.json"));
        assert!(matches!(&page.text()[0], TextBlock::Error(m) if m == banner));
        match &page.text()[1] {
            TextBlock::Help(help) => {
                assert_eq!(help.steps.len(), 4);
                assert!(help.steps[0].contains("stories/test1.json"));
                assert_eq!(help.reload_label, "Reload");
            }
            other => panic!("expected help block, got {other:?}"),
        }
        assert!(page.status().starts_with("Status: Error: failed to load story"));
    }

    #[test]
    fn init_error_has_no_checklist() {
        let mut page = PageSurface::new();
        let err = StoryError::from(InitError::new("missing root"));
        show_error(&mut page, &err);
        assert_eq!(page.text().len(), 1);
        assert_eq!(
            page.error_banner(),
            Some("story initialization failed: missing root")
        );
    }
}
