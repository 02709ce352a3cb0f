//! Validate, persist, then download: the three steps of storing one attachment.
//!
//! Each step consumes the previous state, so a row can only be written after
//! every URL validated, and downloads can only start once the row exists.
//!
//! ```ignore
//! let photo = AttachmentTransaction::validate(&[url])?
//!     .persist(repository::media::insert_photo(db, model))
//!     .await?;
//! let tasks = vec![DownloadTask::new(url, store.photo_path(photo.record().id, url))];
//! let photo = photo.download_all(&downloader, tasks).await?;
//! ```

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::entity::{photo, video};
use crate::repository::RepositoryError;

use super::download::{DownloadError, DownloadTask, Downloader};

/// A persisted row that owns downloadable files.
pub trait AttachmentRecord {
    fn record_id(&self) -> i32;
}

impl AttachmentRecord for photo::Model {
    fn record_id(&self) -> i32 {
        self.id
    }
}

impl AttachmentRecord for video::Model {
    fn record_id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    /// A URL was empty or not an absolute http(s) URL. Nothing was written.
    #[error("invalid attachment URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The row insert failed. No downloads were attempted.
    #[error("failed to persist attachment: {0}")]
    Persist(#[from] RepositoryError),

    /// The row exists but a download failed; `written` lists files completed
    /// before the failure. Neither the row nor those files are removed.
    #[error("attachment {record_id} persisted but download failed: {source}")]
    Download {
        record_id: i32,
        written: Vec<PathBuf>,
        #[source]
        source: DownloadError,
    },
}

impl AttachmentError {
    fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Entry point of the chain.
pub struct AttachmentTransaction;

impl AttachmentTransaction {
    /// Check that every URL is a non-empty absolute `http`/`https` URL.
    pub fn validate(urls: &[&str]) -> Result<Validated, AttachmentError> {
        for raw in urls {
            validate_url(raw)?;
        }
        Ok(Validated { _private: () })
    }
}

fn validate_url(raw: &str) -> Result<(), AttachmentError> {
    if raw.trim().is_empty() {
        return Err(AttachmentError::invalid_url(raw, "empty"));
    }
    let parsed =
        url::Url::parse(raw).map_err(|e| AttachmentError::invalid_url(raw, e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AttachmentError::invalid_url(
                raw,
                format!("unsupported scheme {other}"),
            ));
        }
    }
    if !parsed.has_host() {
        return Err(AttachmentError::invalid_url(raw, "missing host"));
    }
    Ok(())
}

/// All URLs validated; the row may now be written.
#[derive(Debug)]
pub struct Validated {
    _private: (),
}

impl Validated {
    /// Run the insert.
    pub async fn persist<M, F>(self, insert: F) -> Result<Persisted<M>, AttachmentError>
    where
        F: Future<Output = Result<M, RepositoryError>>,
    {
        let record = insert.await?;
        Ok(Persisted { record })
    }
}

/// The row exists; its generated id can name the local files.
#[derive(Debug)]
pub struct Persisted<M> {
    record: M,
}

impl<M: AttachmentRecord> Persisted<M> {
    #[must_use]
    pub fn record(&self) -> &M {
        &self.record
    }

    /// Download every task in order, stopping at the first failure.
    pub async fn download_all(
        self,
        downloader: &Downloader,
        tasks: Vec<DownloadTask>,
    ) -> Result<M, AttachmentError> {
        let mut written = Vec::with_capacity(tasks.len());
        for task in tasks {
            if let Err(source) = downloader.download(&task).await {
                return Err(AttachmentError::Download {
                    record_id: self.record.record_id(),
                    written,
                    source,
                });
            }
            written.push(task.path);
        }
        Ok(self.record)
    }
}
