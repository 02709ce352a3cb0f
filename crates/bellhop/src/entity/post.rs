//! Post entity - the canonical record for one mirrored remote post.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::post_status::PostStatus;
use crate::entity::post_type::PostType;

/// Post model - one row per distinct (source, external_id).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Generated primary key.
    #[sea_orm(primary_key)]
    pub id: i32,

    // ─── Lifecycle ───────────────────────────────────────────────────────────
    /// When this row was written.
    pub created_at: DateTimeWithTimeZone,
    /// Stamped together with `created_at`; posts are never updated in place.
    pub updated_at: DateTimeWithTimeZone,

    // ─── Classification ──────────────────────────────────────────────────────
    /// Review status (queued for likes, approved for own posts).
    pub status: PostStatus,
    /// Safe-for-work flag. Always false on import.
    #[sea_orm(default_value = false)]
    pub sfw: bool,
    /// Name of the remote service (e.g. `tumblr`).
    pub source: String,
    /// Content type; selects the child table.
    #[sea_orm(column_name = "type")]
    pub post_type: PostType,
    /// When the post was originally published.
    pub released_at: DateTimeWithTimeZone,

    // ─── Provenance ──────────────────────────────────────────────────────────
    /// Blog name or author.
    pub category: String,
    /// Identifier assigned by the remote service.
    pub external_id: String,
    /// Link to the post on the remote service.
    #[sea_orm(column_type = "Text")]
    pub external_url: String,
    /// Link to the original post, when reblogged.
    #[sea_orm(column_type = "Text")]
    pub source_url: String,
    /// Author of the original post, when reblogged.
    pub source_category: String,

    // ─── Engagement ──────────────────────────────────────────────────────────
    /// Note/like count at import time.
    pub likes: i64,
    /// Caption or summary text.
    #[sea_orm(column_type = "Text")]
    pub summary: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::link::Entity")]
    Links,
    #[sea_orm(has_many = "super::text::Entity")]
    Texts,
    #[sea_orm(has_many = "super::photo::Entity")]
    Photos,
    #[sea_orm(has_many = "super::video::Entity")]
    Videos,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTags,
}

impl Related<super::link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Links.def()
    }
}

impl Related<super::text::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Texts.def()
    }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Videos.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
