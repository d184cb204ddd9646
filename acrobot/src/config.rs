//! Application config: storage, logging, team and ambient policy. Loaded from env.
//! Telegram connectivity lives in [`acrobot_telegram::TelegramConfig`].

use anyhow::{anyhow, Result};
use handlers::AmbientPolicy;
use std::env;

#[derive(Debug, Clone)]
pub struct AcrobotConfig {
    /// DATABASE_URL: SQLite file path or `sqlite:` URL
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// ACROBOT_TEAM_ID: Telegram has no workspace, so every chat belongs to this team
    pub team_id: String,
    /// ACROBOT_AMBIENT_POLICY: `announce` or `annotate`
    pub ambient_policy: AmbientPolicy,
}

impl AcrobotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset or blank values take their defaults.
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let ambient_policy = match lookup("ACROBOT_AMBIENT_POLICY") {
            Some(raw) => raw
                .parse::<AmbientPolicy>()
                .map_err(|e: String| anyhow!("ACROBOT_AMBIENT_POLICY: {}", e))?,
            None => AmbientPolicy::default(),
        };
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "acrobot.db".to_string()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "logs/acrobot.log".to_string()),
            team_id: lookup("ACROBOT_TEAM_ID").unwrap_or_else(|| "default".to_string()),
            ambient_policy,
        })
    }
}
