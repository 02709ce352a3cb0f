//! Photo entity - one image attached to a `photo` post.
//!
//! A single post may own several photos. The image bytes are mirrored to
//! `photo_<id><ext>` in the media root.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub post_id: i32,
    /// Caption of this individual photo.
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    /// Original-size image URL on the remote service.
    #[sea_orm(column_type = "Text")]
    pub external_url: String,
    #[sea_orm(default_value = false)]
    pub sfw: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
