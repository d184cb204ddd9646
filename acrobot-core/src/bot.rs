//! Bot abstraction for sending replies and editing messages in place.
//!
//! [`Bot`] is transport-agnostic; acrobot-telegram implements it via teloxide and tests substitute a mock.

use crate::error::{AcroError, Result};
use crate::types::Message;
use async_trait::async_trait;

/// Abstraction for outbound messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given channel.
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<()>;

    /// Replies to the given message (same channel).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.channel_id, text).await
    }

    /// Replaces the text of an existing message, acting with `access_token` (the author's credential).
    async fn update_message(
        &self,
        access_token: &str,
        channel_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<()>;
}

/// Parses a numeric transport id (chat id or message id) from its string form.
pub fn parse_message_id(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| AcroError::Bot(format!("Invalid numeric id: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InteractionKind, User};
    use std::sync::Mutex;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("-100200").unwrap(), -100200);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    struct RecordingBot {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, channel_id: &str, text: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((channel_id.to_string(), text.to_string()));
            Ok(())
        }

        async fn update_message(&self, _: &str, _: &str, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
    }

    /// **Test: default reply_to sends into the channel of the original message.**
    #[tokio::test]
    async fn test_reply_to_uses_message_channel() {
        let bot = RecordingBot {
            sent: Mutex::new(Vec::new()),
        };
        let message = Message {
            id: "1".to_string(),
            team_id: "T1".to_string(),
            channel_id: "C42".to_string(),
            user: User {
                id: "U1".to_string(),
                username: None,
            },
            content: "ping".to_string(),
            kind: InteractionKind::DirectMessage,
            created_at: chrono::Utc::now(),
        };

        bot.reply_to(&message, "pong").await.unwrap();

        let sent = bot.sent.lock().unwrap();
        assert_eq!(*sent, vec![("C42".to_string(), "pong".to_string())]);
    }
}
