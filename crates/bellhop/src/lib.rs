//! Bellhop - mirrors a Tumblr blog, its likes and its subscriptions into a
//! local database and media directory.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//! - `tumblr` - The Tumblr API client and OAuth 1.0a signer.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bellhop::{connect_and_migrate, media::{Downloader, MediaStore}, sync::Syncer};
//!
//! let db = Arc::new(connect_and_migrate("sqlite://bellhop.db?mode=rwc").await?);
//! let syncer = Syncer::builder()
//!     .platform(client)
//!     .database(db)
//!     .media_store(MediaStore::new("media"))
//!     .downloader(Downloader::new(transport))
//!     .blog("someblog")
//!     .build()?;
//! syncer.sync_content().await?;
//! ```

pub mod db;
pub mod entity;
pub mod http;
pub mod media;
pub mod platform;
pub mod repository;
pub mod sync;

#[cfg(feature = "tumblr")]
pub mod tumblr;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use http::{HttpError, HttpTransport, ReqwestTransport};
pub use platform::{BlogPlatform, PlatformError};
pub use repository::RepositoryError;
pub use sync::{SyncError, Syncer};
