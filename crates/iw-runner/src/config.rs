//! Configuration for a story page.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use iw_core::{DEFAULT_STORY_PATH, StorySource};
use serde::{Deserialize, Serialize};

use crate::error::RunnerResult;

/// Default HTTP fetch timeout, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Configuration for a story page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Story document to load.
    #[serde(default)]
    pub story: StorySource,
    /// Seconds before an HTTP fetch is abandoned.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            story: StorySource::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl PageConfig {
    /// Load configuration.
    ///
    /// Sources, later ones winning: built-in defaults, then `file` (or an
    /// optional `inkwell.toml` in the working directory when `file` is
    /// `None`), then `INKWELL_*` environment variables.
    pub fn load(file: Option<&Path>) -> RunnerResult<Self> {
        let mut builder = Config::builder()
            .set_default("story", DEFAULT_STORY_PATH)?
            .set_default("fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("inkwell").required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("INKWELL").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Set the story source.
    pub fn with_story(mut self, story: StorySource) -> Self {
        self.story = story;
        self
    }

    /// Set the HTTP fetch timeout (at least one second).
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs.max(1);
        self
    }

    /// The HTTP fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.story.to_string(), "stories/test1.json");
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn builder_methods() {
        let cfg = PageConfig::default()
            .with_story(StorySource::parse("http://localhost/a.json"))
            .with_fetch_timeout_secs(5);
        assert!(cfg.story.is_remote());
        assert_eq!(cfg.fetch_timeout_secs, 5);
    }

    #[test]
    fn timeout_clamped() {
        let cfg = PageConfig::default().with_fetch_timeout_secs(0);
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inkwell.toml");
        std::fs::write(&file, "story = \"tales/intro.json\"\nfetch_timeout_secs = 7\n").unwrap();

        let cfg = PageConfig::load(Some(&file)).unwrap();
        assert_eq!(cfg.story, StorySource::parse("tales/intro.json"));
        assert_eq!(cfg.fetch_timeout_secs, 7);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inkwell.toml");
        std::fs::write(&file, "fetch_timeout_secs = 12\n").unwrap();

        let cfg = PageConfig::load(Some(&file)).unwrap();
        assert_eq!(cfg.story, StorySource::default());
        assert_eq!(cfg.fetch_timeout_secs, 12);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PageConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
