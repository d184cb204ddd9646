//! Unit test module
//!
//! Handler tests live here, separate from source files. They drive handlers through the public
//! `Handler::handle` API with an in-memory store and a recording bot.


use std::sync::Arc;

use acrobot_core::{InteractionKind, Message, User};
use chrono::Utc;
use registry::AcronymSession;
use storage::Store;

/// In-memory store plus a session loaded from it.
pub(crate) async fn fixture() -> (Store, Arc<AcronymSession>) {
    let store = Store::open("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store");
    let session = AcronymSession::load(
        Arc::new(store.teams.clone()),
        Arc::new(store.channels.clone()),
    )
    .await
    .expect("Failed to load session");
    (store, Arc::new(session))
}

/// Builds a message in team T1, channel C1, from user U1.
pub(crate) fn message(kind: InteractionKind, content: &str) -> Message {
    Message {
        id: "1001".to_string(),
        team_id: "T1".to_string(),
        channel_id: "C1".to_string(),
        user: User {
            id: "U1".to_string(),
            username: Some("test_user".to_string()),
        },
        content: content.to_string(),
        kind,
        created_at: Utc::now(),
    }
}
