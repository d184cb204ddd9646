//! Core types: user, message, interaction kind, handler response, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender identity. Ids are strings so any transport (numeric or opaque ids) maps onto them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
}

/// How a message reached the bot. Everything except [`InteractionKind::Ambient`] is directly addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    /// Private conversation with the bot.
    DirectMessage,
    /// The bot is mentioned somewhere in the text (or the message replies to the bot).
    Mention,
    /// The text starts with a mention of the bot.
    DirectMention,
    /// Channel traffic not addressed to the bot.
    Ambient,
}

impl InteractionKind {
    /// True for direct messages and both kinds of mention.
    pub fn is_direct(&self) -> bool {
        !matches!(self, InteractionKind::Ambient)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::DirectMessage => "direct_message",
            InteractionKind::Mention => "mention",
            InteractionKind::DirectMention => "direct_mention",
            InteractionKind::Ambient => "ambient",
        }
    }
}

/// A single inbound event: who sent what, where, and how it was addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport message id; also the target of in-place edits.
    pub id: String,
    pub team_id: String,
    pub channel_id: String,
    pub user: User,
    /// Message text. For mentions the bot mention has already been stripped by the transport.
    pub content: String,
    pub kind: InteractionKind,
    pub created_at: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the response body so middleware can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Processes one message. The first handler returning `Stop` or `Reply` ends the handle phase.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}

/// Runs around the handlers: `before` in order (false stops the chain), `after` in reverse with the final response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_kinds() {
        assert!(InteractionKind::DirectMessage.is_direct());
        assert!(InteractionKind::Mention.is_direct());
        assert!(InteractionKind::DirectMention.is_direct());
        assert!(!InteractionKind::Ambient.is_direct());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(InteractionKind::DirectMention.as_str(), "direct_mention");
        assert_eq!(InteractionKind::Ambient.as_str(), "ambient");
    }
}
