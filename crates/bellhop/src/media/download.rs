use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::http::{HttpError, HttpRequest, HttpTransport};

/// One remote file to mirror to a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches remote files over the shared [`HttpTransport`].
#[derive(Clone)]
pub struct Downloader {
    transport: Arc<dyn HttpTransport>,
}

impl Downloader {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch `task.url` and write the body to `task.path`.
    ///
    /// The file is only created once the full body has arrived with a 2xx
    /// status. Returns the number of bytes written.
    #[tracing::instrument(skip(self, task), fields(url = %task.url))]
    pub async fn download(&self, task: &DownloadTask) -> Result<u64, DownloadError> {
        let response = self
            .transport
            .send(HttpRequest::get(&task.url))
            .await
            .map_err(|source| DownloadError::Http {
                url: task.url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(DownloadError::Status {
                url: task.url.clone(),
                status: response.status,
            });
        }

        tokio::fs::write(&task.path, &response.body)
            .await
            .map_err(|source| DownloadError::Io {
                path: task.path.clone(),
                source,
            })?;

        let bytes = response.body.len() as u64;
        tracing::debug!(path = %task.path.display(), bytes, "Downloaded attachment");
        Ok(bytes)
    }
}
