//! Review status of a mirrored post.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status assigned when a post is mirrored.
///
/// Posts from the owning blog are final and land as `Approved`; liked posts
/// from other blogs still need review and land as `Queued`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PostStatus {
    #[sea_orm(string_value = "queued")]
    Queued,
    #[sea_orm(string_value = "approved")]
    Approved,
}

impl PostStatus {
    /// Whether the post is finalized (tags are only kept for finalized posts).
    #[inline]
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, PostStatus::Approved)
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Queued => write!(f, "queued"),
            PostStatus::Approved => write!(f, "approved"),
        }
    }
}
