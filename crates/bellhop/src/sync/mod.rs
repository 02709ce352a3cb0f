//! The synchronization pipeline.
//!
//! # Module Structure
//!
//! - [`paginate`] - `PageWalker`, offset pagination over a declared total
//! - [`dedup`] - `Deduplicator`, the already-stored gate
//! - [`classify`] - remote post to canonical post plus typed child records
//! - [`persist`] - storing one classified post with its attachments and tags
//! - [`engine`] - `Syncer`: content sync, subscription import and export
//! - [`progress`] - `SyncProgress`, `ProgressCallback`, `emit()`
//!
//! # Example
//!
//! ```ignore
//! use bellhop::sync::Syncer;
//!
//! let syncer = Syncer::builder()
//!     .platform(client)
//!     .database(db)
//!     .media_store(store)
//!     .downloader(downloader)
//!     .blog("someblog")
//!     .build()?;
//! let report = syncer.sync_content().await?;
//! ```

pub mod classify;
pub mod dedup;
pub mod engine;
pub mod paginate;
pub mod persist;
mod progress;
mod types;

pub use classify::{ClassifiedPost, ClassifyError, PostContent, classify, parse_remote_timestamp};
pub use dedup::Deduplicator;
pub use engine::{SyncError, Syncer, SyncerBuilder};
pub use paginate::PageWalker;
pub use persist::{ItemError, StoredPost};
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use types::{
    Collection, ContentSyncReport, FlowStats, PAGE_LIMIT, SubscriptionExportReport,
    SubscriptionImportReport,
};
