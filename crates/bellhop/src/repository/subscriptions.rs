use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use crate::entity::subscription::{ActiveModel, Column, Entity as Subscription, Model};

use super::errors::{RepositoryError, Result};

/// Insert a new subscription.
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

/// All subscriptions in insertion order (ascending id).
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Subscription::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Delete every subscription.
///
/// Returns the number of rows deleted.
pub async fn remove_all(db: &DatabaseConnection) -> Result<u64> {
    let result = Subscription::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

/// Count stored subscriptions.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    Subscription::find()
        .count(db)
        .await
        .map_err(RepositoryError::from)
}
