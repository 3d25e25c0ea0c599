//! Fetching and parsing story documents.
//!
//! Reading the document is the only place a story page waits on I/O. Local
//! paths are read with `tokio::fs`; `http(s)` URLs go through `reqwest`.

use std::io;
use std::time::Duration;

use iw_core::{LoadError, LoadErrorKind, StoryDocument, StoryEngine, StoryError, StorySource};
use reqwest::StatusCode;
use tracing::instrument;

use crate::report::update_status;
use crate::surface::PresentationSurface;

/// Make sure an engine is available before anything is fetched.
///
/// On success the engine name and version are written to the version line.
pub fn check_engine<'e, S>(
    engine: Option<&'e dyn StoryEngine>,
    surface: &mut S,
) -> Result<&'e dyn StoryEngine, StoryError>
where
    S: PresentationSurface + ?Sized,
{
    update_status(surface, "checking story engine");
    let engine = engine.ok_or(StoryError::EngineUnavailable)?;
    surface.set_version(format!("{} {}", engine.name(), engine.version()));
    update_status(surface, &format!("{} engine ready", engine.name()));
    Ok(engine)
}

/// Reads story documents from files or URLs.
#[derive(Debug, Clone)]
pub struct StoryLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl StoryLoader {
    /// Create a loader whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Fetch and parse the document at `source`, reporting each phase.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn load<S>(
        &self,
        source: &StorySource,
        surface: &mut S,
    ) -> Result<StoryDocument, LoadError>
    where
        S: PresentationSurface + ?Sized,
    {
        let path = source.to_string();
        update_status(surface, &format!("loading story file: {path}"));
        let bytes = self.fetch(source, &path).await?;

        update_status(surface, "story file loaded, parsing");
        let document = StoryDocument::parse(&bytes).map_err(|e| {
            LoadError::new(LoadErrorKind::ParseError(e.to_string()), path.as_str())
        })?;
        tracing::debug!(
            bytes = bytes.len(),
            keys = ?document.top_level_keys(),
            ink_version = ?document.ink_version(),
            "story document parsed"
        );
        Ok(document)
    }

    async fn fetch(&self, source: &StorySource, path: &str) -> Result<Vec<u8>, LoadError> {
        match source {
            StorySource::Path(file) => tokio::fs::read(file).await.map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => LoadError::not_found(path),
                _ => LoadError::new(LoadErrorKind::Transport(e.to_string()), path),
            }),
            StorySource::Url(url) => {
                let transport =
                    |e: reqwest::Error| LoadError::new(LoadErrorKind::Transport(e.to_string()), path);

                let response = self
                    .client
                    .get(url)
                    .timeout(self.timeout)
                    .send()
                    .await
                    .map_err(transport)?;

                let status = response.status();
                if status == StatusCode::NOT_FOUND {
                    return Err(LoadError::not_found(path));
                }
                if !status.is_success() {
                    return Err(LoadError::new(
                        LoadErrorKind::HttpError(status.as_u16()),
                        path,
                    ));
                }

                let body = response.bytes().await.map_err(transport)?;
                Ok(body.to_vec())
            }
        }
    }
}
