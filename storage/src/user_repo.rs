//! User repository: access tokens for in-place message edits.

use async_trait::async_trait;
use tracing::info;

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::repository::Repository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    /// Wraps an existing pool and creates the `users` table if needed.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                access_token TEXT NOT NULL
            )
            "#,
        )
        .execute(pool_manager.pool())
        .await?;
        Ok(Self { pool_manager })
    }
}

#[async_trait]
impl Repository<UserRecord> for UserRepository {
    async fn save(&self, user: &UserRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, access_token) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET access_token = excluded.access_token
            "#,
        )
        .bind(&user.id)
        .bind(&user.access_token)
        .execute(self.pool_manager.pool())
        .await?;

        // Never log the token itself.
        info!(user_id = %user.id, "Saved user record");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        let record =
            sqlx::query_as::<_, UserRecord>("SELECT id, access_token FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool_manager.pool())
                .await?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, StorageError> {
        let records =
            sqlx::query_as::<_, UserRecord>("SELECT id, access_token FROM users ORDER BY id")
                .fetch_all(self.pool_manager.pool())
                .await?;
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
