//! Local mirroring of post attachments.
//!
//! - [`derive_suffix`] sniffs a file extension from a remote URL.
//! - [`MediaStore`] maps persisted record ids to file names under the media root.
//! - [`Downloader`] fetches a URL and writes the body to disk.
//! - [`AttachmentTransaction`] sequences validation, the row insert and the
//!   downloads for one photo or video.

mod download;
mod store;
mod suffix;
mod transaction;

pub use download::{DownloadError, DownloadTask, Downloader};
pub use store::MediaStore;
pub use suffix::derive_suffix;
pub use transaction::{
    AttachmentError, AttachmentRecord, AttachmentTransaction, Persisted, Validated,
};
