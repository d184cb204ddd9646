//! Per-team acronym maps and the conflict policy: `define` refuses duplicates, `update` always overwrites.
//!
//! Every operation takes raw acronym text and normalizes it; the returned key is the canonical form.

use std::collections::{BTreeMap, HashMap};

use crate::error::RegistryError;
use crate::normalize::normalize;

/// Result of an upsert: the canonical key and whether it was newly created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    pub key: String,
    pub created: bool,
}

/// Team id → (acronym key → expansion).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    teams: HashMap<String, BTreeMap<String, String>>,
}

fn key_for(raw: &str) -> Result<String, RegistryError> {
    let key = normalize(raw);
    if key.is_empty() {
        return Err(RegistryError::EmptyAcronym(raw.to_string()));
    }
    Ok(key)
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.teams.contains_key(team_id)
    }

    /// Installs a team's map as loaded from storage, replacing whatever was held.
    pub fn insert_team(&mut self, team_id: &str, acronyms: BTreeMap<String, String>) {
        self.teams.insert(team_id.to_string(), acronyms);
    }

    /// The team's map, if the team has been referenced.
    pub fn team(&self, team_id: &str) -> Option<&BTreeMap<String, String>> {
        self.teams.get(team_id)
    }

    fn team_mut(&mut self, team_id: &str) -> &mut BTreeMap<String, String> {
        self.teams.entry(team_id.to_string()).or_default()
    }

    /// Adds a new acronym. Fails with `DuplicateAcronym` if the key exists; the stored expansion is kept.
    pub fn define(
        &mut self,
        team_id: &str,
        acronym: &str,
        expansion: &str,
    ) -> Result<String, RegistryError> {
        let key = key_for(acronym)?;
        let team = self.team_mut(team_id);
        if team.contains_key(&key) {
            return Err(RegistryError::DuplicateAcronym(key));
        }
        team.insert(key.clone(), expansion.to_string());
        Ok(key)
    }

    /// Creates or overwrites an acronym.
    pub fn update(
        &mut self,
        team_id: &str,
        acronym: &str,
        expansion: &str,
    ) -> Result<Upsert, RegistryError> {
        let key = key_for(acronym)?;
        let previous = self
            .team_mut(team_id)
            .insert(key.clone(), expansion.to_string());
        Ok(Upsert {
            key,
            created: previous.is_none(),
        })
    }

    pub fn lookup(&self, team_id: &str, acronym: &str) -> Option<&str> {
        self.teams
            .get(team_id)?
            .get(&normalize(acronym))
            .map(String::as_str)
    }

    /// Removes an acronym. Fails with `UnknownAcronym` (and changes nothing) if it is not defined.
    pub fn delete(&mut self, team_id: &str, acronym: &str) -> Result<String, RegistryError> {
        let key = key_for(acronym)?;
        match self.teams.get_mut(team_id).and_then(|t| t.remove(&key)) {
            Some(_) => Ok(key),
            None => Err(RegistryError::UnknownAcronym(key)),
        }
    }
}
