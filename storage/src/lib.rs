//! Storage crate: durable mirror of the bot's team, channel and user records.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TeamRecord, ChannelRecord, UserRecord
//! - [`repository`] – Repository trait (the narrow get/save/all interface the bot consumes)
//! - [`team_repo`], [`channel_repo`], [`user_repo`] – SQLite repositories
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`store`] – Store, opening all three repositories on one pool

mod channel_repo;
mod error;
mod models;
mod repository;
mod sqlite_pool;
mod store;
mod team_repo;
mod user_repo;

pub use channel_repo::ChannelRepository;
pub use error::StorageError;
pub use models::{ChannelRecord, TeamRecord, UserRecord};
pub use repository::Repository;
pub use sqlite_pool::SqlitePoolManager;
pub use store::Store;
pub use team_repo::TeamRepository;
pub use user_repo::UserRepository;
