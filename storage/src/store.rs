//! Opens the three repositories on one shared pool.

use tracing::info;

use crate::channel_repo::ChannelRepository;
use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;
use crate::team_repo::TeamRepository;
use crate::user_repo::UserRepository;

/// All repositories the bot needs, backed by the same database.
#[derive(Clone)]
pub struct Store {
    pub teams: TeamRepository,
    pub channels: ChannelRepository,
    pub users: UserRepository,
}

impl Store {
    /// Opens (or creates) the database at `database_url` and ensures every table exists.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self {
            teams: TeamRepository::new(pool_manager.clone()).await?,
            channels: ChannelRepository::new(pool_manager.clone()).await?,
            users: UserRepository::new(pool_manager).await?,
        };
        info!(database_url = %database_url, "Storage ready");
        Ok(store)
    }
}
