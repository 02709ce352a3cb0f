//! Shared sync types, constants and per-flow reports.

use std::fmt;

/// Page size for every remote collection walk (Tumblr's maximum).
pub const PAGE_LIMIT: u64 = 20;

/// The remote collection a flow is walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Posts published on the configured blog.
    BlogPosts,
    /// Posts liked by the authenticated user.
    Likes,
    /// Blogs the authenticated user follows.
    Following,
    /// Locally stored subscriptions (export source).
    Subscriptions,
}

impl Collection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::BlogPosts => "posts",
            Collection::Likes => "likes",
            Collection::Following => "following",
            Collection::Subscriptions => "subscriptions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for one walked collection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlowStats {
    /// Declared total from the probe request.
    pub total: u64,
    /// Items received across all pages.
    pub fetched: usize,
    /// Items newly persisted.
    pub saved: usize,
    /// Items skipped because they were already stored.
    pub skipped_existing: usize,
    /// Items that failed classification, validation, persistence or download.
    pub failed: usize,
    /// Follow-up remote calls (delete, unlike) that failed.
    pub remote_mutation_failures: usize,
    /// Item-scoped error messages.
    pub errors: Vec<String>,
}

impl FlowStats {
    pub(crate) fn with_total(total: u64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub(crate) fn record_failure(&mut self, message: String) {
        self.failed += 1;
        self.errors.push(message);
    }
}

/// Result of [`crate::sync::Syncer::sync_content`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentSyncReport {
    pub posts: FlowStats,
    pub likes: FlowStats,
}

impl ContentSyncReport {
    #[must_use]
    pub fn saved(&self) -> usize {
        self.posts.saved + self.likes.saved
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.posts.failed + self.likes.failed
    }

    /// All item-scoped error messages, posts first.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.posts
            .errors
            .iter()
            .chain(self.likes.errors.iter())
            .map(String::as_str)
    }
}

/// Result of [`crate::sync::Syncer::import_subscriptions`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubscriptionImportReport {
    /// Local rows deleted before the walk.
    pub removed: u64,
    /// Declared total from the probe request.
    pub total: u64,
    pub fetched: usize,
    pub saved: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Result of [`crate::sync::Syncer::export_subscriptions`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubscriptionExportReport {
    /// Local subscriptions read.
    pub total: usize,
    /// Follow calls issued successfully.
    pub followed: usize,
}
