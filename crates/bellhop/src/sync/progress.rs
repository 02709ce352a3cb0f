//! Progress events emitted by the sync flows.
//!
//! The CLI renders these as progress bars on a terminal and as log lines
//! otherwise; the library never prints.

use super::types::Collection;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Probe finished; the walk over `collection` is starting.
    FetchingCollection {
        collection: Collection,
        /// Declared total from the probe.
        total: u64,
    },

    /// A page arrived.
    FetchedPage {
        collection: Collection,
        offset: u64,
        count: usize,
    },

    /// A post and its children were stored.
    SavedPost {
        collection: Collection,
        external_id: String,
        post_type: String,
    },

    /// The post was already stored.
    SkippedExisting {
        collection: Collection,
        external_id: String,
    },

    /// An item failed and was skipped.
    ItemFailed {
        collection: Collection,
        external_id: String,
        error: String,
    },

    /// Delete or unlike failed after a successful save.
    RemoteMutationFailed {
        collection: Collection,
        external_id: String,
        error: String,
    },

    /// Walk over `collection` finished.
    CollectionComplete {
        collection: Collection,
        saved: usize,
        skipped: usize,
        failed: usize,
    },

    /// Local subscriptions were cleared before an import.
    RemovedSubscriptions { count: u64 },

    /// A subscription row was stored.
    SavedSubscription { blog_name: String },

    /// A follow call succeeded.
    Followed { url: String },

    /// Warning message (non-fatal).
    Warning { message: String },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
