//! Channel repository: the persisted listen flag per channel.

use async_trait::async_trait;
use tracing::info;

use crate::error::StorageError;
use crate::models::ChannelRecord;
use crate::repository::Repository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ChannelRepository {
    pool_manager: SqlitePoolManager,
}

impl ChannelRepository {
    /// Wraps an existing pool and creates the `channels` table if needed.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS channels (
                id TEXT PRIMARY KEY,
                listen BOOLEAN NOT NULL
            )
            "#,
        )
        .execute(pool_manager.pool())
        .await?;
        Ok(Self { pool_manager })
    }
}

#[async_trait]
impl Repository<ChannelRecord> for ChannelRepository {
    async fn save(&self, channel: &ChannelRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO channels (id, listen) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET listen = excluded.listen
            "#,
        )
        .bind(&channel.id)
        .bind(channel.listen)
        .execute(self.pool_manager.pool())
        .await?;

        info!(channel_id = %channel.id, listen = channel.listen, "Saved channel record");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ChannelRecord>, StorageError> {
        let record = sqlx::query_as::<_, ChannelRecord>("SELECT id, listen FROM channels WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ChannelRecord>, StorageError> {
        let records = sqlx::query_as::<_, ChannelRecord>("SELECT id, listen FROM channels ORDER BY id")
            .fetch_all(self.pool_manager.pool())
            .await?;
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM channels WHERE id = ?")
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
