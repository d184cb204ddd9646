//! Persisted record models, one per table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A team and its full acronym map (key → expansion). Written wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: String,
    pub acronyms: BTreeMap<String, String>,
}

impl TeamRecord {
    pub fn new(id: impl Into<String>, acronyms: BTreeMap<String, String>) -> Self {
        Self {
            id: id.into(),
            acronyms,
        }
    }
}

/// Whether ambient scanning is active in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChannelRecord {
    pub id: String,
    pub listen: bool,
}

impl ChannelRecord {
    pub fn new(id: impl Into<String>, listen: bool) -> Self {
        Self {
            id: id.into(),
            listen,
        }
    }
}

/// A user's platform credential, used to edit their messages in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub access_token: String,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            access_token: access_token.into(),
        }
    }
}
