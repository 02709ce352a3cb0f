//! The three sync flows and the builder that wires their collaborators.
//!
//! ```ignore
//! let syncer = Syncer::builder()
//!     .platform(client)
//!     .database(db)
//!     .media_store(MediaStore::new("media"))
//!     .downloader(Downloader::new(transport))
//!     .blog("someblog")
//!     .build()?;
//!
//! let report = syncer.sync_content().await?;
//! println!("saved {} posts", report.saved());
//! ```

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

use crate::entity::post_status::PostStatus;
use crate::entity::subscription;
use crate::media::{Downloader, MediaStore};
use crate::platform::{BlogPlatform, Page, PageRequest, PlatformError, RemoteBlog, RemotePost};
use crate::repository::{self, RepositoryError};

use super::classify::classify;
use super::dedup::Deduplicator;
use super::paginate::PageWalker;
use super::persist::PostWriter;
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{
    Collection, ContentSyncReport, FlowStats, PAGE_LIMIT, SubscriptionExportReport,
    SubscriptionImportReport,
};

/// Flow-level failure. Item-scoped problems never surface here; they are
/// counted in the reports instead.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A page fetch or follow call failed; the flow stopped.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to prepare media directory: {0}")]
    MediaRoot(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Which remote post collection a content walk reads.
#[derive(Clone, Copy)]
enum Feed<'a> {
    Blog(&'a str),
    Likes,
}

impl Feed<'_> {
    fn collection(self) -> Collection {
        match self {
            Feed::Blog(_) => Collection::BlogPosts,
            Feed::Likes => Collection::Likes,
        }
    }

    /// Own posts are approved; liked posts land in the review queue.
    fn status(self) -> PostStatus {
        match self {
            Feed::Blog(_) => PostStatus::Approved,
            Feed::Likes => PostStatus::Queued,
        }
    }
}

pub struct SyncerBuilder<P> {
    platform: Option<P>,
    database: Option<Arc<DatabaseConnection>>,
    media_store: Option<MediaStore>,
    downloader: Option<Downloader>,
    blog: Option<String>,
    progress: Option<Arc<ProgressCallback>>,
}

impl<P> Default for SyncerBuilder<P> {
    fn default() -> Self {
        Self {
            platform: None,
            database: None,
            media_store: None,
            downloader: None,
            blog: None,
            progress: None,
        }
    }
}

impl<P: BlogPlatform> SyncerBuilder<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, platform: P) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn database(mut self, db: Arc<DatabaseConnection>) -> Self {
        self.database = Some(db);
        self
    }

    /// Where photo and video files are written. Required for content sync.
    pub fn media_store(mut self, store: MediaStore) -> Self {
        self.media_store = Some(store);
        self
    }

    /// Fetches attachment bytes. Required for content sync.
    pub fn downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = Some(downloader);
        self
    }

    /// The owning blog whose posts are mirrored. Required for content sync.
    pub fn blog(mut self, blog: impl Into<String>) -> Self {
        self.blog = Some(blog.into());
        self
    }

    pub fn progress(mut self, callback: Arc<ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// # Errors
    ///
    /// Returns `SyncError::MissingField` without a platform or database.
    pub fn build(self) -> Result<Syncer<P>> {
        let platform = self
            .platform
            .ok_or(SyncError::MissingField { field: "platform" })?;
        let db = self
            .database
            .ok_or(SyncError::MissingField { field: "database" })?;

        Ok(Syncer {
            platform,
            db,
            media_store: self.media_store,
            downloader: self.downloader,
            blog: self.blog.filter(|b| !b.trim().is_empty()),
            progress: self.progress,
        })
    }
}

pub struct Syncer<P> {
    platform: P,
    db: Arc<DatabaseConnection>,
    media_store: Option<MediaStore>,
    downloader: Option<Downloader>,
    blog: Option<String>,
    progress: Option<Arc<ProgressCallback>>,
}

impl<P: BlogPlatform> Syncer<P> {
    pub fn builder() -> SyncerBuilder<P> {
        SyncerBuilder::new()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    fn emit(&self, event: SyncProgress) {
        emit(self.progress.as_deref(), event);
    }

    /// Mirror the owning blog's posts and the user's likes.
    ///
    /// Newly stored own posts are deleted remotely, newly stored likes are
    /// unliked. Both totals are read before either walk starts.
    #[tracing::instrument(skip(self), fields(source = self.platform.source_name()))]
    pub async fn sync_content(&self) -> Result<ContentSyncReport> {
        let blog = self
            .blog
            .as_deref()
            .ok_or(SyncError::MissingField { field: "blog" })?;
        let store = self
            .media_store
            .as_ref()
            .ok_or(SyncError::MissingField {
                field: "media_store",
            })?;
        let downloader = self
            .downloader
            .as_ref()
            .ok_or(SyncError::MissingField { field: "downloader" })?;
        store.ensure_root().await.map_err(SyncError::MediaRoot)?;

        let posts_total = self.fetch_posts(Feed::Blog(blog), PageRequest::probe()).await?.total;
        let likes_total = self.fetch_posts(Feed::Likes, PageRequest::probe()).await?.total;
        tracing::info!(posts_total, likes_total, "collection totals");

        let writer = PostWriter::new(&self.db, store, downloader);
        let posts = self.walk_posts(Feed::Blog(blog), posts_total, &writer).await?;
        let likes = self.walk_posts(Feed::Likes, likes_total, &writer).await?;

        Ok(ContentSyncReport { posts, likes })
    }

    async fn fetch_posts(&self, feed: Feed<'_>, page: PageRequest) -> Result<Page<RemotePost>> {
        let page = match feed {
            Feed::Blog(blog) => self.platform.list_posts(blog, page).await?,
            Feed::Likes => self.platform.list_likes(page).await?,
        };
        Ok(page)
    }

    async fn walk_posts(
        &self,
        feed: Feed<'_>,
        total: u64,
        writer: &PostWriter<'_>,
    ) -> Result<FlowStats> {
        let collection = feed.collection();
        let source = self.platform.source_name();
        let dedup = Deduplicator::new(&self.db, source);
        let mut stats = FlowStats::with_total(total);

        self.emit(SyncProgress::FetchingCollection { collection, total });

        for request in PageWalker::new(total, PAGE_LIMIT) {
            let page = self.fetch_posts(feed, request).await?;
            tracing::debug!(%collection, offset = request.offset, count = page.items.len(), "fetched page");
            self.emit(SyncProgress::FetchedPage {
                collection,
                offset: request.offset,
                count: page.items.len(),
            });

            for item in &page.items {
                stats.fetched += 1;
                self.process_post(feed, item, &dedup, writer, &mut stats).await;
            }
        }

        tracing::info!(
            %collection,
            saved = stats.saved,
            skipped = stats.skipped_existing,
            failed = stats.failed,
            "collection complete"
        );
        self.emit(SyncProgress::CollectionComplete {
            collection,
            saved: stats.saved,
            skipped: stats.skipped_existing,
            failed: stats.failed,
        });
        Ok(stats)
    }

    async fn process_post(
        &self,
        feed: Feed<'_>,
        item: &RemotePost,
        dedup: &Deduplicator<'_>,
        writer: &PostWriter<'_>,
        stats: &mut FlowStats,
    ) {
        let collection = feed.collection();
        let external_id = item.id.to_string();

        match dedup.exists(&external_id).await {
            Ok(true) => {
                tracing::debug!(%collection, %external_id, "already stored");
                stats.skipped_existing += 1;
                self.emit(SyncProgress::SkippedExisting {
                    collection,
                    external_id,
                });
                return;
            }
            Ok(false) => {}
            Err(e) => {
                self.item_failed(collection, external_id, e.to_string(), stats);
                return;
            }
        }

        let classified = match classify(item, self.platform.source_name(), feed.status()) {
            Ok(classified) => classified,
            Err(e) => {
                self.item_failed(collection, external_id, e.to_string(), stats);
                return;
            }
        };

        let stored = match writer.store(&classified).await {
            Ok(stored) => stored,
            Err(e) => {
                self.item_failed(collection, external_id, e.to_string(), stats);
                return;
            }
        };

        stats.saved += 1;
        tracing::info!(%collection, %external_id, post_id = stored.post.id, "saved post");
        self.emit(SyncProgress::SavedPost {
            collection,
            external_id: external_id.clone(),
            post_type: stored.post.post_type.to_string(),
        });

        let mutation = match feed {
            Feed::Blog(blog) => self.platform.delete_post(blog, item.id).await,
            Feed::Likes => self.platform.unlike(item.id, &item.reblog_key).await,
        };
        if let Err(e) = mutation {
            tracing::warn!(
                %collection,
                %external_id,
                status = ?e.status(),
                error = %e,
                "remote cleanup failed"
            );
            stats.remote_mutation_failures += 1;
            self.emit(SyncProgress::RemoteMutationFailed {
                collection,
                external_id,
                error: e.to_string(),
            });
        }
    }

    fn item_failed(
        &self,
        collection: Collection,
        external_id: String,
        error: String,
        stats: &mut FlowStats,
    ) {
        tracing::warn!(%collection, %external_id, %error, "skipping item");
        stats.record_failure(format!("{collection} {external_id}: {error}"));
        self.emit(SyncProgress::ItemFailed {
            collection,
            external_id,
            error,
        });
    }

    /// Replace local subscriptions with the remote following list.
    ///
    /// The existing rows are removed once the remote total is known. A fetch
    /// failure after that point leaves a partial mirror.
    #[tracing::instrument(skip(self), fields(source = self.platform.source_name()))]
    pub async fn import_subscriptions(&self) -> Result<SubscriptionImportReport> {
        let collection = Collection::Following;
        let total = self.platform.list_following(PageRequest::probe()).await?.total;

        let removed = repository::subscriptions::remove_all(&self.db).await?;
        tracing::info!(removed, total, "replacing subscriptions");
        self.emit(SyncProgress::RemovedSubscriptions { count: removed });
        self.emit(SyncProgress::FetchingCollection { collection, total });

        let mut report = SubscriptionImportReport {
            removed,
            total,
            ..SubscriptionImportReport::default()
        };

        for request in PageWalker::new(total, PAGE_LIMIT) {
            let page = self.platform.list_following(request).await?;
            self.emit(SyncProgress::FetchedPage {
                collection,
                offset: request.offset,
                count: page.items.len(),
            });

            for blog in page.items {
                report.fetched += 1;
                let blog_name = blog.name.clone();
                match repository::subscriptions::insert(&self.db, self.subscription_model(blog))
                    .await
                {
                    Ok(_) => {
                        report.saved += 1;
                        self.emit(SyncProgress::SavedSubscription { blog_name });
                    }
                    Err(e) => {
                        tracing::warn!(%blog_name, error = %e, "failed to save subscription");
                        report.failed += 1;
                        report.errors.push(format!("{blog_name}: {e}"));
                        self.emit(SyncProgress::ItemFailed {
                            collection,
                            external_id: blog_name,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        self.emit(SyncProgress::CollectionComplete {
            collection,
            saved: report.saved,
            skipped: 0,
            failed: report.failed,
        });
        Ok(report)
    }

    fn subscription_model(&self, blog: RemoteBlog) -> subscription::ActiveModel {
        let now = Utc::now().fixed_offset();
        subscription::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            blog_name: Set(blog.name),
            source: Set(self.platform.source_name().to_string()),
            url: Set(blog.url),
            description: Set(blog.description),
            title: Set(blog.title),
            ..Default::default()
        }
    }

    /// Follow every stored subscription, oldest first. The first failed
    /// follow stops the export.
    #[tracing::instrument(skip(self), fields(source = self.platform.source_name()))]
    pub async fn export_subscriptions(&self) -> Result<SubscriptionExportReport> {
        let subscriptions = repository::subscriptions::list(&self.db).await?;
        let mut report = SubscriptionExportReport {
            total: subscriptions.len(),
            followed: 0,
        };
        tracing::info!(total = report.total, "exporting subscriptions");
        self.emit(SyncProgress::FetchingCollection {
            collection: Collection::Subscriptions,
            total: report.total as u64,
        });

        for sub in subscriptions {
            self.platform.follow(&sub.url).await?;
            report.followed += 1;
            tracing::debug!(url = %sub.url, "followed");
            self.emit(SyncProgress::Followed { url: sub.url });
        }

        Ok(report)
    }
}
