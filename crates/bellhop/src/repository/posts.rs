use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::entity::post::{ActiveModel, Column, Entity as Post, Model};

use super::errors::{RepositoryError, Result};

/// Insert a new post.
///
/// # Errors
/// Returns `RepositoryError::Database` if the insert fails (e.g., the
/// `(source, external_id)` pair already exists).
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

/// Find a post by its remote identity.
pub async fn find_by_external_id(
    db: &DatabaseConnection,
    source: &str,
    external_id: &str,
) -> Result<Option<Model>> {
    Post::find()
        .filter(Column::Source.eq(source))
        .filter(Column::ExternalId.eq(external_id))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// Whether a post with this remote identity has already been stored.
pub async fn exists_by_external_id(
    db: &DatabaseConnection,
    source: &str,
    external_id: &str,
) -> Result<bool> {
    let n = Post::find()
        .filter(Column::Source.eq(source))
        .filter(Column::ExternalId.eq(external_id))
        .count(db)
        .await?;
    Ok(n > 0)
}

/// Count all stored posts.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    Post::find().count(db).await.map_err(RepositoryError::from)
}
