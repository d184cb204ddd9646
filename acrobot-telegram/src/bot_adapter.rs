//! Wraps teloxide::Bot and implements [`acrobot_core::Bot`]. Production code talks to Telegram;
//! tests substitute another Bot impl.

use acrobot_core::{parse_message_id, AcroError, Bot as CoreBot, Result};
use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId, types::MessageId};
use tracing::error;

/// Creates a teloxide Bot for `token`, pointed at `api_url` when one is configured.
/// An unparsable URL is logged and the default Telegram endpoint is used.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> teloxide::Bot {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

fn chat_id(channel_id: &str) -> Result<ChatId> {
    parse_message_id(channel_id).map(ChatId)
}

/// Thin wrapper around teloxide::Bot that implements acrobot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    api_url: Option<String>,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot. `api_url` is reused for the
    /// per-user clients that perform in-place edits.
    pub fn new(bot: teloxide::Bot, api_url: Option<String>) -> Self {
        Self { bot, api_url }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<()> {
        self.bot
            .send_message(chat_id(channel_id)?, text.to_string())
            .await
            .map_err(|e| AcroError::Bot(e.to_string()))?;
        Ok(())
    }

    /// Edits with a client authenticated as `access_token`, not as this bot; Telegram only lets
    /// the author of a message change it.
    ///
    /// The Bot API cannot act for a human account, so this only succeeds when the message was sent
    /// by the bot that `access_token` belongs to. For messages typed by people the call fails and
    /// the annotate policy falls back to announcing; do not expect in-place edits on Telegram.
    async fn update_message(
        &self,
        access_token: &str,
        channel_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<()> {
        let id = i32::try_from(parse_message_id(message_id)?).map_err(|_| {
            AcroError::Bot(format!("Invalid message_id for edit: {}", message_id))
        })?;
        let author = build_teloxide_bot(access_token, self.api_url.as_deref());
        author
            .edit_message_text(chat_id(channel_id)?, MessageId(id), text)
            .await
            .map_err(|e| AcroError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_parses_negative_group_ids() {
        assert_eq!(chat_id("-100123").unwrap(), ChatId(-100123));
        assert!(chat_id("C1").is_err());
    }

    #[tokio::test]
    async fn test_update_message_rejects_bad_message_id() {
        let adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"), None);
        let result = adapter
            .update_message("user_token", "-100123", "not-a-number", "text")
            .await;
        assert!(matches!(result, Err(AcroError::Bot(_))));
    }

    #[test]
    fn test_build_teloxide_bot_sets_api_url() {
        let bot = build_teloxide_bot("dummy_token", Some("http://localhost:8081"));
        assert_eq!(bot.api_url().as_str(), "http://localhost:8081/");
    }

    #[test]
    fn test_build_teloxide_bot_ignores_invalid_url() {
        let bot = build_teloxide_bot("dummy_token", Some("not a url"));
        assert!(bot.api_url().host_str().is_some());
    }
}
