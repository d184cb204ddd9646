//! Session context: the in-memory registry and listen-set for the life of the process.
//!
//! In-memory state is the source of truth. Storage is a mirror: read when a team is first referenced
//! (and once for all channels at startup), written after every successful mutation. A failed write is
//! logged and the in-memory change stands. A team whose record could not be read is never written
//! until a later read succeeds, so an unread record is not overwritten.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use storage::{ChannelRecord, Repository, StorageError, TeamRecord};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::error::RegistryError;
use crate::listen_set::ListenSet;
use crate::registry::{Registry, Upsert};

pub struct AcronymSession {
    registry: RwLock<Registry>,
    listening: RwLock<ListenSet>,
    /// Teams held in memory whose stored record could not be read.
    unread: RwLock<HashSet<String>>,
    teams: Arc<dyn Repository<TeamRecord>>,
    channels: Arc<dyn Repository<ChannelRecord>>,
}

impl AcronymSession {
    /// Empty session; nothing is read from storage until [`AcronymSession::load`] or a team is referenced.
    pub fn new(
        teams: Arc<dyn Repository<TeamRecord>>,
        channels: Arc<dyn Repository<ChannelRecord>>,
    ) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            listening: RwLock::new(ListenSet::new()),
            unread: RwLock::new(HashSet::new()),
            teams,
            channels,
        }
    }

    /// Builds a session whose listen-set holds every persisted channel with `listen = true`.
    pub async fn load(
        teams: Arc<dyn Repository<TeamRecord>>,
        channels: Arc<dyn Repository<ChannelRecord>>,
    ) -> Result<Self, StorageError> {
        let session = Self::new(teams, channels);
        let listening: ListenSet = session
            .channels
            .find_all()
            .await?
            .into_iter()
            .filter(|c| c.listen)
            .map(|c| c.id)
            .collect();
        info!(listening = listening.len(), "Loaded listening channels");
        *session.listening.write().await = listening;
        Ok(session)
    }

    /// Reads a team's record into memory, replacing any held copy. A missing record means an empty team.
    #[instrument(skip(self))]
    pub async fn load_team(&self, team_id: &str) -> Result<(), StorageError> {
        let acronyms = self
            .teams
            .find_by_id(team_id)
            .await?
            .map(|record| record.acronyms)
            .unwrap_or_default();
        info!(team_id = %team_id, count = acronyms.len(), "Loaded team acronyms");
        self.registry.write().await.insert_team(team_id, acronyms);
        self.unread.write().await.remove(team_id);
        Ok(())
    }

    /// Loads the team on first reference. If storage cannot be read the team starts empty in memory
    /// and is marked unread.
    async fn ensure_team(&self, team_id: &str) {
        if self.registry.read().await.has_team(team_id) {
            return;
        }
        if let Err(e) = self.load_team(team_id).await {
            warn!(team_id = %team_id, error = %e, "Failed to load team, starting empty without writing it back");
            self.registry
                .write()
                .await
                .insert_team(team_id, BTreeMap::new());
            self.unread.write().await.insert(team_id.to_string());
        }
    }

    /// For an unread team, retries the read and lays the in-memory entries over the stored ones.
    /// Returns false while the record still cannot be read.
    async fn merge_unread(&self, team_id: &str) -> bool {
        if !self.unread.read().await.contains(team_id) {
            return true;
        }
        match self.teams.find_by_id(team_id).await {
            Ok(record) => {
                let mut merged = record.map(|r| r.acronyms).unwrap_or_default();
                let mut registry = self.registry.write().await;
                if let Some(held) = registry.team(team_id) {
                    merged.extend(held.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                info!(team_id = %team_id, count = merged.len(), "Merged team with its stored record");
                registry.insert_team(team_id, merged);
                self.unread.write().await.remove(team_id);
                true
            }
            Err(e) => {
                warn!(team_id = %team_id, error = %e, "Team record still unreadable, not writing it");
                false
            }
        }
    }

    /// Writes the team's whole map to storage. Failures are logged, never returned.
    async fn persist_team(&self, team_id: &str) {
        if !self.merge_unread(team_id).await {
            return;
        }
        let acronyms = self
            .registry
            .read()
            .await
            .team(team_id)
            .cloned()
            .unwrap_or_default();
        let record = TeamRecord::new(team_id, acronyms);
        if let Err(e) = self.teams.save(&record).await {
            error!(team_id = %team_id, error = %e, "Failed to persist team acronyms");
        }
    }

    async fn persist_channel(&self, channel_id: &str, listen: bool) {
        if let Err(e) = self
            .channels
            .save(&ChannelRecord::new(channel_id, listen))
            .await
        {
            error!(channel_id = %channel_id, listen, error = %e, "Failed to persist channel");
        }
    }

    /// Adds a new acronym; refuses to overwrite an existing one. Returns the canonical key.
    #[instrument(skip(self, expansion))]
    pub async fn define(
        &self,
        team_id: &str,
        acronym: &str,
        expansion: &str,
    ) -> Result<String, RegistryError> {
        self.ensure_team(team_id).await;
        let key = self
            .registry
            .write()
            .await
            .define(team_id, acronym, expansion)?;
        info!(team_id = %team_id, acronym = %key, "Defined acronym");
        self.persist_team(team_id).await;
        Ok(key)
    }

    /// Creates or overwrites an acronym.
    #[instrument(skip(self, expansion))]
    pub async fn update(
        &self,
        team_id: &str,
        acronym: &str,
        expansion: &str,
    ) -> Result<Upsert, RegistryError> {
        self.ensure_team(team_id).await;
        let upsert = self
            .registry
            .write()
            .await
            .update(team_id, acronym, expansion)?;
        if upsert.created {
            info!(team_id = %team_id, acronym = %upsert.key, "No existing acronym to update, created it");
        } else {
            info!(team_id = %team_id, acronym = %upsert.key, "Updated acronym");
        }
        self.persist_team(team_id).await;
        Ok(upsert)
    }

    /// Returns `(key, expansion)` or `UnknownAcronym`.
    pub async fn lookup(
        &self,
        team_id: &str,
        acronym: &str,
    ) -> Result<(String, String), RegistryError> {
        self.ensure_team(team_id).await;
        let key = crate::normalize(acronym);
        let registry = self.registry.read().await;
        match registry.lookup(team_id, &key) {
            Some(expansion) => Ok((key, expansion.to_string())),
            None => Err(RegistryError::UnknownAcronym(key)),
        }
    }

    /// Removes an acronym; `UnknownAcronym` leaves the registry (and storage) untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, team_id: &str, acronym: &str) -> Result<String, RegistryError> {
        self.ensure_team(team_id).await;
        let key = self.registry.write().await.delete(team_id, acronym)?;
        info!(team_id = %team_id, acronym = %key, "Deleted acronym");
        self.persist_team(team_id).await;
        Ok(key)
    }

    /// Snapshot of a team's acronyms, for scanning.
    pub async fn acronyms(&self, team_id: &str) -> BTreeMap<String, String> {
        self.ensure_team(team_id).await;
        self.registry
            .read()
            .await
            .team(team_id)
            .cloned()
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn start_listening(&self, channel_id: &str) {
        self.listening.write().await.start(channel_id);
        info!(channel_id = %channel_id, "Start listening");
        self.persist_channel(channel_id, true).await;
    }

    #[instrument(skip(self))]
    pub async fn stop_listening(&self, channel_id: &str) {
        self.listening.write().await.stop(channel_id);
        info!(channel_id = %channel_id, "Stop listening");
        self.persist_channel(channel_id, false).await;
    }

    pub async fn is_listening(&self, channel_id: &str) -> bool {
        self.listening.read().await.contains(channel_id)
    }
}
