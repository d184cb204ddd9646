//! Telegram connection settings: token and API URL, loaded from BOT_TOKEN and TELEGRAM_API_URL
//! (or TELOXIDE_API_URL).

use anyhow::Result;
use std::env;

/// Minimal Telegram config (connectivity only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required, TELEGRAM_API_URL / TELOXIDE_API_URL optional.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`from_env`](Self::from_env), but `token` overrides BOT_TOKEN when given.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        Ok(Self::with_token(bot_token).with_api_url(api_url_from_env()))
    }

    /// Uses the given token; no custom API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    pub fn with_api_url(mut self, telegram_api_url: Option<String>) -> Self {
        self.telegram_api_url = telegram_api_url;
        self
    }

    /// Fails when an API URL is set but cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

fn api_url_from_env() -> Option<String> {
    env::var("TELEGRAM_API_URL")
        .or_else(|_| env::var("TELOXIDE_API_URL"))
        .ok()
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_prefers_explicit_token() {
        let config = TelegramConfig::load(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = TelegramConfig::with_token("t".to_string())
            .with_api_url(Some("not a url".to_string()));
        assert!(config.validate().is_err());
    }
}
