//! Content type of a mirrored post.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supported post content types.
///
/// Each type owns a different child table (links, texts, photos, videos).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PostType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "link")]
    Link,
    #[sea_orm(string_value = "photo")]
    Photo,
    #[sea_orm(string_value = "video")]
    Video,
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Text => write!(f, "text"),
            PostType::Link => write!(f, "link"),
            PostType::Photo => write!(f, "photo"),
            PostType::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(PostType::Text),
            "link" => Ok(PostType::Link),
            "photo" => Ok(PostType::Photo),
            "video" => Ok(PostType::Video),
            _ => Err(format!("Unsupported post type: {}", s)),
        }
    }
}
