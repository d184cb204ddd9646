//! Adapters from Telegram (teloxide) types to acrobot_core types, plus the addressing rules that
//! decide each message's [`InteractionKind`].

use acrobot_core::{InteractionKind, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0.to_string(),
            username: self.0.username.clone(),
        }
    }
}

/// Byte range of the first `@username` in `text` that is not part of a longer handle.
/// Telegram usernames are ASCII and case-insensitive.
fn find_mention(text: &str, bot_username: &str) -> Option<(usize, usize)> {
    let needle = format!("@{}", bot_username);
    let bytes = text.as_bytes();
    let n = needle.len();
    if n > bytes.len() {
        return None;
    }
    (0..=bytes.len() - n).find_map(|start| {
        let end = start + n;
        let matched = bytes[start..end].eq_ignore_ascii_case(needle.as_bytes());
        let boundary = bytes
            .get(end)
            .map_or(true, |b| !(b.is_ascii_alphanumeric() || *b == b'_'));
        (matched && boundary).then_some((start, end))
    })
}

/// Decides how a message addresses the bot and returns the text handlers should see.
///
/// - private chat: `DirectMessage`, text unchanged
/// - text starting with `@bot`: `DirectMention`, the mention and any `:`/`,` after it removed
/// - `@bot` elsewhere: `Mention`, the mention removed
/// - reply to one of the bot's messages: `Mention`, text unchanged
/// - anything else: `Ambient`
pub fn classify(
    is_private: bool,
    text: &str,
    bot_username: Option<&str>,
    reply_to_bot: bool,
) -> (InteractionKind, String) {
    if is_private {
        return (InteractionKind::DirectMessage, text.to_string());
    }

    let trimmed = text.trim_start();
    if let Some((start, end)) = bot_username.and_then(|u| find_mention(trimmed, u)) {
        if start == 0 {
            let rest = trimmed[end..].trim_start_matches([':', ',']).trim();
            return (InteractionKind::DirectMention, rest.to_string());
        }
        let stripped = format!("{}{}", &trimmed[..start], &trimmed[end..]);
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        return (InteractionKind::Mention, collapsed);
    }

    if reply_to_bot {
        return (InteractionKind::Mention, text.to_string());
    }
    (InteractionKind::Ambient, text.to_string())
}

/// Wraps a teloxide Message for conversion to core [`Message`].
///
/// Telegram has no workspace concept, so every message is attributed to the configured `team_id`.
pub struct TelegramMessageWrapper<'a> {
    pub message: &'a teloxide::types::Message,
    pub bot_username: Option<&'a str>,
    pub team_id: &'a str,
}

impl<'a> TelegramMessageWrapper<'a> {
    pub fn new(
        message: &'a teloxide::types::Message,
        bot_username: Option<&'a str>,
        team_id: &'a str,
    ) -> Self {
        Self {
            message,
            bot_username,
            team_id,
        }
    }

    /// Returns true if the replied-to message was sent by this bot.
    fn is_reply_to_bot(&self) -> bool {
        self.message
            .reply_to_message()
            .and_then(|m| m.from.as_ref())
            .map(|u| {
                u.is_bot
                    && match (self.bot_username, u.username.as_deref()) {
                        (Some(ours), Some(theirs)) => ours.eq_ignore_ascii_case(theirs),
                        _ => true,
                    }
            })
            .unwrap_or(false)
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let (kind, content) = classify(
            self.message.chat.is_private(),
            self.message.text().unwrap_or(""),
            self.bot_username,
            self.is_reply_to_bot(),
        );
        Message {
            id: self.message.id.0.to_string(),
            team_id: self.team_id.to_string(),
            channel_id: self.message.chat.id.0.to_string(),
            user: self
                .message
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: "0".to_string(),
                    username: None,
                }),
            content,
            kind,
            created_at: chrono::Utc::now(),
        }
    }
}
