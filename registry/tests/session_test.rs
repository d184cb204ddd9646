//! Integration tests for [`registry::AcronymSession`]: write-through to storage, startup loading,
//! and best-effort durability when storage fails.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use registry::{AcronymSession, RegistryError};
use storage::{ChannelRecord, Repository, StorageError, Store, TeamRecord};

async fn store() -> Store {
    Store::open("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store")
}

async fn session_on(store: &Store) -> AcronymSession {
    AcronymSession::load(
        Arc::new(store.teams.clone()),
        Arc::new(store.channels.clone()),
    )
    .await
    .expect("Failed to load session")
}

/// Team repository whose writes always fail; reads see nothing.
#[derive(Default)]
struct FailingTeams {
    save_attempts: AtomicUsize,
}

#[async_trait]
impl Repository<TeamRecord> for FailingTeams {
    async fn save(&self, _entity: &TeamRecord) -> Result<(), StorageError> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Database("disk full".to_string()))
    }
    async fn find_by_id(&self, _id: &str) -> Result<Option<TeamRecord>, StorageError> {
        Ok(None)
    }
    async fn find_all(&self) -> Result<Vec<TeamRecord>, StorageError> {
        Ok(Vec::new())
    }
    async fn delete(&self, _id: &str) -> Result<bool, StorageError> {
        Ok(false)
    }
}

/// Team repository whose reads fail until `readable` is set; writes land in memory.
struct FlakyTeams {
    readable: AtomicBool,
    records: Mutex<BTreeMap<String, TeamRecord>>,
    save_attempts: AtomicUsize,
}

impl FlakyTeams {
    fn with_record(record: TeamRecord) -> Self {
        let mut records = BTreeMap::new();
        records.insert(record.id.clone(), record);
        Self {
            readable: AtomicBool::new(false),
            records: Mutex::new(records),
            save_attempts: AtomicUsize::new(0),
        }
    }

    fn stored(&self, id: &str) -> BTreeMap<String, String> {
        self.records.lock().unwrap()[id].acronyms.clone()
    }
}

#[async_trait]
impl Repository<TeamRecord> for FlakyTeams {
    async fn save(&self, entity: &TeamRecord) -> Result<(), StorageError> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(entity.id.clone(), entity.clone());
        Ok(())
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<TeamRecord>, StorageError> {
        if !self.readable.load(Ordering::SeqCst) {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        Ok(self.records.lock().unwrap().get(id).cloned())
    }
    async fn find_all(&self) -> Result<Vec<TeamRecord>, StorageError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
    async fn delete(&self, _id: &str) -> Result<bool, StorageError> {
        Ok(false)
    }
}

/// **Scenario: T1 starts empty; "API" is defined, then a second define is refused.**
///
/// **Expected:** storage holds `{API: "Application Programming Interface"}` after the first define,
/// and the duplicate leaves both memory and storage unchanged.
#[tokio::test]
async fn test_define_writes_through_and_refuses_duplicate() {
    let store = store().await;
    let session = session_on(&store).await;

    let key = session
        .define("T1", "API", "Application Programming Interface")
        .await
        .unwrap();
    assert_eq!(key, "API");

    let saved = store.teams.find_by_id("T1").await.unwrap().unwrap();
    assert_eq!(saved.acronyms["API"], "Application Programming Interface");

    let err = session
        .define("T1", "API", "Another Pointless Idea")
        .await
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateAcronym("API".to_string()));

    let (_, expansion) = session.lookup("T1", "api").await.unwrap();
    assert_eq!(expansion, "Application Programming Interface");
    let saved = store.teams.find_by_id("T1").await.unwrap().unwrap();
    assert_eq!(saved.acronyms["API"], "Application Programming Interface");
}

/// **Test: update overwrites, delete removes, and each change reaches storage.**
#[tokio::test]
async fn test_update_and_delete_write_through() {
    let store = store().await;
    let session = session_on(&store).await;

    let created = session.update("T1", "ETA", "Estimated Time").await.unwrap();
    assert!(created.created);
    let replaced = session
        .update("T1", "eta", "Estimated Time of Arrival")
        .await
        .unwrap();
    assert!(!replaced.created);

    let saved = store.teams.find_by_id("T1").await.unwrap().unwrap();
    assert_eq!(saved.acronyms["ETA"], "Estimated Time of Arrival");

    assert_eq!(session.delete("T1", "ETA").await.unwrap(), "ETA");
    assert_eq!(
        session.lookup("T1", "ETA").await.unwrap_err(),
        RegistryError::UnknownAcronym("ETA".to_string())
    );
    let saved = store.teams.find_by_id("T1").await.unwrap().unwrap();
    assert!(saved.acronyms.is_empty());

    assert_eq!(
        session.delete("T1", "ETA").await.unwrap_err(),
        RegistryError::UnknownAcronym("ETA".to_string())
    );
}

/// **Test: a team persisted earlier is loaded on first reference.**
#[tokio::test]
async fn test_team_loaded_from_storage() {
    let store = store().await;
    let mut acronyms = BTreeMap::new();
    acronyms.insert("FYI".to_string(), "For Your Information".to_string());
    store
        .teams
        .save(&TeamRecord::new("T1", acronyms))
        .await
        .unwrap();

    let session = session_on(&store).await;

    let (key, expansion) = session.lookup("T1", "fyi").await.unwrap();
    assert_eq!(key, "FYI");
    assert_eq!(expansion, "For Your Information");
    assert_eq!(session.acronyms("T1").await.len(), 1);
}

/// **Test: only channels persisted with listen = true are active after load.**
#[tokio::test]
async fn test_load_keeps_only_listening_channels() {
    let store = store().await;
    store.channels.save(&ChannelRecord::new("C1", true)).await.unwrap();
    store.channels.save(&ChannelRecord::new("C2", false)).await.unwrap();

    let session = session_on(&store).await;

    assert!(session.is_listening("C1").await);
    assert!(!session.is_listening("C2").await);
    assert!(!session.is_listening("C3").await);
}

/// **Test: start then stop leaves the channel inactive and the last persisted record has listen = false.**
#[tokio::test]
async fn test_start_then_stop_listening() {
    let store = store().await;
    let session = session_on(&store).await;

    session.start_listening("C1").await;
    assert!(session.is_listening("C1").await);
    assert_eq!(
        store.channels.find_by_id("C1").await.unwrap(),
        Some(ChannelRecord::new("C1", true))
    );

    session.stop_listening("C1").await;
    assert!(!session.is_listening("C1").await);
    assert_eq!(
        store.channels.find_by_id("C1").await.unwrap(),
        Some(ChannelRecord::new("C1", false))
    );
}

/// **Test: when storage rejects the write, the mutation still succeeds in memory and is not rolled back.**
#[tokio::test]
async fn test_persistence_failure_keeps_memory_state() {
    let store = store().await;
    let teams = Arc::new(FailingTeams::default());
    let session = AcronymSession::new(teams.clone(), Arc::new(store.channels.clone()));

    session
        .define("T1", "SLA", "Service Level Agreement")
        .await
        .expect("define reports success despite storage failure");
    session
        .update("T1", "KPI", "Key Performance Indicator")
        .await
        .unwrap();

    assert_eq!(teams.save_attempts.load(Ordering::SeqCst), 2);
    assert_eq!(
        session.lookup("T1", "SLA").await.unwrap().1,
        "Service Level Agreement"
    );
    assert_eq!(session.acronyms("T1").await.len(), 2);
}

/// **Test: a team whose record cannot be read is not written over; once reads recover, the stored
/// and in-memory entries are merged and saved together.**
#[tokio::test]
async fn test_unreadable_team_is_not_overwritten() {
    let store = store().await;
    let mut acronyms = BTreeMap::new();
    acronyms.insert("FYI".to_string(), "For Your Information".to_string());
    let teams = Arc::new(FlakyTeams::with_record(TeamRecord::new("T1", acronyms)));
    let session = AcronymSession::new(teams.clone(), Arc::new(store.channels.clone()));

    session
        .define("T1", "ETA", "Estimated Time of Arrival")
        .await
        .unwrap();

    assert_eq!(teams.save_attempts.load(Ordering::SeqCst), 0);
    assert_eq!(teams.stored("T1").len(), 1);
    assert_eq!(
        session.lookup("T1", "ETA").await.unwrap().1,
        "Estimated Time of Arrival"
    );

    teams.readable.store(true, Ordering::SeqCst);
    session
        .define("T1", "SLA", "Service Level Agreement")
        .await
        .unwrap();

    assert_eq!(teams.save_attempts.load(Ordering::SeqCst), 1);
    let stored = teams.stored("T1");
    assert_eq!(
        stored.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["ETA", "FYI", "SLA"]
    );
    assert_eq!(session.acronyms("T1").await, stored);
}
