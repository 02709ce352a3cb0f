use async_trait::async_trait;

use super::errors::Result;

/// Offset/limit window into a remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    #[must_use]
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// The zero-offset request used to learn a collection's total.
    ///
    /// Clients send it without explicit paging parameters.
    #[must_use]
    pub fn probe() -> Self {
        Self {
            offset: 0,
            limit: 0,
        }
    }

    #[must_use]
    pub fn is_probe(&self) -> bool {
        self.offset == 0 && self.limit == 0
    }
}

/// One page of a remote collection plus the collection's declared size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }
}

/// One image of a photo post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePhoto {
    pub caption: String,
    /// URL of the original-size rendition.
    pub original_url: String,
}

/// A post as delivered by the remote service, before classification.
///
/// Type-specific fields are empty for post types that do not use them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePost {
    pub id: i64,
    /// Type tag (`text`, `link`, `photo`, `video`, or anything else the
    /// service invents).
    pub post_type: String,
    pub blog_name: String,
    pub post_url: String,
    pub source_url: String,
    pub source_title: String,
    pub note_count: i64,
    /// Publication time in the service's `YYYY-MM-DD HH:MM:SS ZONE` format.
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub reblog_key: String,

    // link
    pub url: String,
    // text
    pub title: String,
    pub body: String,
    // photo
    pub photos: Vec<RemotePhoto>,
    // video
    pub video_url: String,
    pub thumbnail_url: String,
}

/// A followed blog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteBlog {
    pub name: String,
    pub url: String,
    pub title: String,
    pub description: String,
}

/// Remote blogging service seam consumed by the sync pipeline.
///
/// Implementations translate one call into one request; paging is driven by
/// the caller.
#[async_trait]
pub trait BlogPlatform: Send + Sync {
    /// Short name stored as `source` on every row (e.g. `tumblr`).
    fn source_name(&self) -> &'static str;

    /// Posts published on `blog`.
    async fn list_posts(&self, blog: &str, page: PageRequest) -> Result<Page<RemotePost>>;

    /// Posts liked by the authenticated user.
    async fn list_likes(&self, page: PageRequest) -> Result<Page<RemotePost>>;

    /// Blogs the authenticated user follows.
    async fn list_following(&self, page: PageRequest) -> Result<Page<RemoteBlog>>;

    /// Delete a post from `blog`.
    async fn delete_post(&self, blog: &str, id: i64) -> Result<()>;

    /// Remove a like.
    async fn unlike(&self, id: i64, reblog_key: &str) -> Result<()>;

    /// Follow the blog at `url`.
    async fn follow(&self, url: &str) -> Result<()>;
}
