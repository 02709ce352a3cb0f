//! Inserts for the typed child records owned by a post.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entity::{link, photo, text, video};

use super::errors::{RepositoryError, Result};

pub async fn insert_link(db: &DatabaseConnection, model: link::ActiveModel) -> Result<link::Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

pub async fn insert_text(db: &DatabaseConnection, model: text::ActiveModel) -> Result<text::Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

pub async fn insert_photo(
    db: &DatabaseConnection,
    model: photo::ActiveModel,
) -> Result<photo::Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

pub async fn insert_video(
    db: &DatabaseConnection,
    model: video::ActiveModel,
) -> Result<video::Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

/// Photos owned by a post, in insertion order.
pub async fn photos_for_post(db: &DatabaseConnection, post_id: i32) -> Result<Vec<photo::Model>> {
    photo::Entity::find()
        .filter(photo::Column::PostId.eq(post_id))
        .order_by_asc(photo::Column::Id)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}
