use async_trait::async_trait;

use crate::error::StorageError;

/// Keyed record store. `save` replaces the whole record; there is no partial update.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn save(&self, entity: &T) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StorageError>;
    async fn find_all(&self) -> Result<Vec<T>, StorageError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;
}
