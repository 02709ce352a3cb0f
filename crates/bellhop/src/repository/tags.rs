//! Tag lookup and post-tag association.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

use crate::entity::{post, post_tag, tag};

use super::errors::{RepositoryError, Result};

/// Return the tag with this name, creating it if it does not exist.
///
/// # Errors
/// Returns `RepositoryError::InvalidInput` for a blank name.
pub async fn find_or_create(db: &DatabaseConnection, name: &str) -> Result<tag::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::invalid_input("tag name is empty"));
    }

    if let Some(existing) = tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now().fixed_offset();
    let model = tag::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(RepositoryError::from)
}

/// Associate a tag with a post.
///
/// Returns `false` when the association already existed.
pub async fn attach(db: &DatabaseConnection, post_id: i32, tag_id: i32) -> Result<bool> {
    if post_tag::Entity::find_by_id((post_id, tag_id))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let link = post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    };
    post_tag::Entity::insert(link)
        .exec_without_returning(db)
        .await?;
    Ok(true)
}

/// Tags attached to a post.
pub async fn tags_for_post(db: &DatabaseConnection, post_id: i32) -> Result<Vec<tag::Model>> {
    let Some(post) = post::Entity::find_by_id(post_id).one(db).await? else {
        return Ok(Vec::new());
    };
    post.find_related(tag::Entity)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}
