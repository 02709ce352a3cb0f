use sea_orm::DatabaseConnection;

use crate::repository::{self, RepositoryError};

/// Existence gate keyed by `(source, external_id)`.
#[derive(Debug, Clone, Copy)]
pub struct Deduplicator<'a> {
    db: &'a DatabaseConnection,
    source: &'a str,
}

impl<'a> Deduplicator<'a> {
    pub fn new(db: &'a DatabaseConnection, source: &'a str) -> Self {
        Self { db, source }
    }

    /// Whether a post with this external id is already stored.
    pub async fn exists(&self, external_id: &str) -> Result<bool, RepositoryError> {
        repository::posts::exists_by_external_id(self.db, self.source, external_id).await
    }
}
