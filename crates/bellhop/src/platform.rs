//! Service-agnostic seam for remote blogging platforms.
//!
//! The sync pipeline only talks to [`BlogPlatform`]; the Tumblr client in
//! [`crate::tumblr`] is one implementation, tests supply in-memory fakes.

mod errors;
mod types;

pub use errors::{PlatformError, Result};
pub use types::{BlogPlatform, Page, PageRequest, RemoteBlog, RemotePhoto, RemotePost};
