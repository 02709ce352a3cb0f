//! Storing one classified post: the parent row, its typed children, their
//! files and its tags.

use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::entity::post;
use crate::media::{AttachmentError, AttachmentTransaction, DownloadTask, Downloader, MediaStore};
use crate::repository::{self, RepositoryError};

use super::classify::{ClassifiedPost, ClassifyError, PostContent, now};

/// Failure scoped to a single remote item. The flow records it and moves on.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("persistence failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a successful store.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub post: post::Model,
    pub children: usize,
    pub tags: usize,
}

pub(crate) struct PostWriter<'a> {
    db: &'a DatabaseConnection,
    store: &'a MediaStore,
    downloader: &'a Downloader,
}

impl<'a> PostWriter<'a> {
    pub(crate) fn new(
        db: &'a DatabaseConnection,
        store: &'a MediaStore,
        downloader: &'a Downloader,
    ) -> Self {
        Self {
            db,
            store,
            downloader,
        }
    }

    /// Write the post and everything it owns.
    ///
    /// Attachment URLs are validated before the parent row is inserted, so a
    /// bad URL leaves no rows behind. A failed download leaves the rows and any
    /// files already written in place.
    #[tracing::instrument(
        skip(self, classified),
        fields(external_id = %classified.post.external_id, post_type = %classified.post.post_type)
    )]
    pub(crate) async fn store(&self, classified: &ClassifiedPost) -> Result<StoredPost, ItemError> {
        let mut validated = Vec::new();
        for urls in attachment_groups(&classified.content) {
            validated.push(AttachmentTransaction::validate(&urls)?);
        }

        let stamp = now();
        let post = repository::posts::insert(self.db, classified.post.to_active_model(stamp)).await?;

        let children = match &classified.content {
            PostContent::Link(link) => {
                repository::media::insert_link(self.db, link.to_active_model(post.id, stamp))
                    .await?;
                1
            }
            PostContent::Text(text) => {
                repository::media::insert_text(self.db, text.to_active_model(post.id, stamp))
                    .await?;
                1
            }
            PostContent::Photos(photos) => {
                for (photo, tx) in photos.iter().zip(validated) {
                    let persisted = tx
                        .persist(repository::media::insert_photo(
                            self.db,
                            photo.to_active_model(post.id, stamp),
                        ))
                        .await?;
                    let path = self
                        .store
                        .photo_path(persisted.record().id, &photo.external_url);
                    persisted
                        .download_all(
                            self.downloader,
                            vec![DownloadTask::new(photo.external_url.as_str(), path)],
                        )
                        .await?;
                }
                photos.len()
            }
            PostContent::Video(video) => {
                for tx in validated {
                    let persisted = tx
                        .persist(repository::media::insert_video(
                            self.db,
                            video.to_active_model(post.id, stamp),
                        ))
                        .await?;
                    let id = persisted.record().id;
                    let tasks = vec![
                        DownloadTask::new(
                            video.external_url.as_str(),
                            self.store.video_path(id, &video.external_url),
                        ),
                        DownloadTask::new(
                            video.thumbnail_url.as_str(),
                            self.store.thumbnail_path(id, &video.thumbnail_url),
                        ),
                    ];
                    persisted.download_all(self.downloader, tasks).await?;
                }
                1
            }
        };

        let tags = self.attach_tags(post.id, &classified.tags).await;

        Ok(StoredPost {
            post,
            children,
            tags,
        })
    }

    /// Tags never fail the item; problems are logged per tag.
    async fn attach_tags(&self, post_id: i32, names: &[String]) -> usize {
        let mut attached = 0;
        for name in names {
            let tag = match repository::tags::find_or_create(self.db, name).await {
                Ok(tag) => tag,
                Err(e) => {
                    tracing::warn!(post_id, tag = %name, error = %e, "skipping tag");
                    continue;
                }
            };
            match repository::tags::attach(self.db, post_id, tag.id).await {
                Ok(true) => attached += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(post_id, tag = %name, error = %e, "failed to attach tag"),
            }
        }
        attached
    }
}

/// URLs grouped per attachment record: one group per photo, a single group
/// holding both video URLs.
fn attachment_groups(content: &PostContent) -> Vec<Vec<&str>> {
    match content {
        PostContent::Photos(photos) => photos
            .iter()
            .map(|p| vec![p.external_url.as_str()])
            .collect(),
        PostContent::Video(_) => vec![content.attachment_urls()],
        PostContent::Link(_) | PostContent::Text(_) => Vec::new(),
    }
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connect_and_migrate;
    use crate::entity::post_status::PostStatus;
    use crate::http::{HttpMethod, HttpResponse, MockTransport};
    use crate::platform::{RemotePhoto, RemotePost};
    use crate::sync::classify::classify;

    fn ok(body: &[u8]) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    fn photo_post(urls: &[&str]) -> RemotePost {
        RemotePost {
            id: 9,
            post_type: "photo".to_string(),
            blog_name: "b".to_string(),
            date: "2024-01-02 03:04:05 GMT".to_string(),
            tags: vec!["x".to_string(), "x".to_string(), "y".to_string()],
            photos: urls
                .iter()
                .map(|u| RemotePhoto {
                    caption: String::new(),
                    original_url: u.to_string(),
                })
                .collect(),
            ..RemotePost::default()
        }
    }

    #[tokio::test]
    async fn test_store_photo_post_downloads_each_attachment() {
        let db = connect_and_migrate("sqlite::memory:").await.expect("db");
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::new(dir.path());
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpMethod::Get, "https://m.example.com/1.jpg", ok(b"one"));
        transport.push_response(HttpMethod::Get, "https://m.example.com/2.png", ok(b"two"));
        let downloader = Downloader::new(transport);
        let writer = PostWriter::new(&db, &store, &downloader);

        let classified = classify(
            &photo_post(&["https://m.example.com/1.jpg", "https://m.example.com/2.png"]),
            "tumblr",
            PostStatus::Approved,
        )
        .expect("classify");
        let stored = writer.store(&classified).await.expect("store");

        assert_eq!(stored.children, 2);
        assert_eq!(stored.tags, 2);
        let photos = repository::media::photos_for_post(&db, stored.post.id)
            .await
            .expect("photos");
        assert_eq!(photos.len(), 2);
        let first = store.photo_path(photos[0].id, &photos[0].external_url);
        assert_eq!(std::fs::read(first).expect("file"), b"one");
    }

    #[tokio::test]
    async fn test_store_bad_url_writes_nothing() {
        let db = connect_and_migrate("sqlite::memory:").await.expect("db");
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::new(dir.path());
        let downloader = Downloader::new(Arc::new(MockTransport::new()));
        let writer = PostWriter::new(&db, &store, &downloader);

        let classified = classify(
            &photo_post(&["https://m.example.com/1.jpg", ""]),
            "tumblr",
            PostStatus::Approved,
        )
        .expect("classify");
        let err = writer.store(&classified).await.expect_err("must fail");

        assert!(matches!(
            err,
            ItemError::Attachment(AttachmentError::InvalidUrl { .. })
        ));
        assert_eq!(repository::posts::count(&db).await.expect("count"), 0);
        assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
    }
}
