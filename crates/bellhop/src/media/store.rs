use std::path::{Path, PathBuf};

use super::suffix::derive_suffix;

/// Deterministic file layout under the media root.
///
/// Names embed the generated record id, so a path is written at most once.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media root if it does not exist.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// `photo_<id><ext>`
    #[must_use]
    pub fn photo_path(&self, photo_id: i32, url: &str) -> PathBuf {
        self.root
            .join(format!("photo_{photo_id}{}", derive_suffix(url)))
    }

    /// `video_<id><ext>`
    #[must_use]
    pub fn video_path(&self, video_id: i32, url: &str) -> PathBuf {
        self.root
            .join(format!("video_{video_id}{}", derive_suffix(url)))
    }

    /// `video_<id>_thumbnail<ext>`
    #[must_use]
    pub fn thumbnail_path(&self, video_id: i32, url: &str) -> PathBuf {
        self.root
            .join(format!("video_{video_id}_thumbnail{}", derive_suffix(url)))
    }
}
