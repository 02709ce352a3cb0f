//! Tumblr API v2 client.
//!
//! - [`error`] - Error types and their mapping to [`crate::platform::PlatformError`]
//! - [`oauth`] - OAuth 1.0a HMAC-SHA1 request signing
//! - [`types`] - Wire types for the JSON envelopes
//! - [`client`] - The [`TumblrClient`], implementing [`crate::platform::BlogPlatform`]
//!
//! ```ignore
//! use bellhop::tumblr::{OAuthCredentials, TumblrClient};
//!
//! let client = TumblrClient::new(OAuthCredentials {
//!     consumer_key: "...".into(),
//!     consumer_secret: "...".into(),
//!     token: "...".into(),
//!     token_secret: "...".into(),
//! })?;
//! ```

mod client;
mod convert;
mod error;
mod oauth;
mod types;

pub use client::{TUMBLR_API_BASE, TUMBLR_SOURCE, TumblrClient};
pub use error::TumblrError;
pub use oauth::{OAuthCredentials, OAuthSigner};
pub use types::{BlogPosts, Following, Likes, TumblrBlog, TumblrPhoto, TumblrPost};
