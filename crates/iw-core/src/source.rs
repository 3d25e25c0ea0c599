//! Where a story document is read from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Story path used when nothing else is configured.
pub const DEFAULT_STORY_PATH: &str = "stories/test1.json";

/// A local file or an HTTP(S) URL holding a story document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorySource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// A document served over HTTP or HTTPS.
    Url(String),
}

impl StorySource {
    /// Classify a location string. `http://` and `https://` become URLs,
    /// `file://` is stripped, and anything else is treated as a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if lower.starts_with("file://") {
            Self::Path(PathBuf::from(&trimmed["file://".len()..]))
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Whether this source is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl Default for StorySource {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_STORY_PATH))
    }
}

impl fmt::Display for StorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl FromStr for StorySource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for StorySource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<StorySource> for String {
    fn from(value: StorySource) -> Self {
        value.to_string()
    }
}
