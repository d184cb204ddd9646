//! Team repository: one row per team, the acronym map stored as a JSON object.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::TeamRecord;
use crate::repository::Repository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct TeamRepository {
    pool_manager: SqlitePoolManager,
}

impl TeamRepository {
    /// Wraps an existing pool and creates the `teams` table if needed.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id TEXT PRIMARY KEY,
                acronyms TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    fn decode(id: String, acronyms: String) -> Result<TeamRecord, StorageError> {
        let acronyms: BTreeMap<String, String> = serde_json::from_str(&acronyms)?;
        Ok(TeamRecord { id, acronyms })
    }
}

#[async_trait]
impl Repository<TeamRecord> for TeamRepository {
    async fn save(&self, team: &TeamRecord) -> Result<(), StorageError> {
        let acronyms = serde_json::to_string(&team.acronyms)?;
        sqlx::query(
            r#"
            INSERT INTO teams (id, acronyms) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET acronyms = excluded.acronyms
            "#,
        )
        .bind(&team.id)
        .bind(acronyms)
        .execute(self.pool_manager.pool())
        .await?;

        info!(team_id = %team.id, count = team.acronyms.len(), "Saved team record");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TeamRecord>, StorageError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT id, acronyms FROM teams WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool_manager.pool())
                .await?;
        debug!(team_id = %id, found = row.is_some(), "Looked up team record");
        row.map(|(id, acronyms)| Self::decode(id, acronyms)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<TeamRecord>, StorageError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, acronyms FROM teams ORDER BY id")
            .fetch_all(self.pool_manager.pool())
            .await?;
        rows.into_iter()
            .map(|(id, acronyms)| Self::decode(id, acronyms))
            .collect()
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
