//! Storage operations for posts, their typed children, tags and subscriptions.
//!
//! Every function takes the connection explicitly and commits independently.

mod errors;
pub mod media;
pub mod posts;
pub mod subscriptions;
pub mod tags;

pub use errors::{RepositoryError, Result};
