use acrobot_core::{HandlerResponse, Message, Middleware, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

const CONTENT_LOG_MAX_CHARS: usize = 120;

/// Truncates message content for logging.
fn truncate_content(content: &str) -> String {
    if content.chars().count() <= CONTENT_LOG_MAX_CHARS {
        content.to_string()
    } else {
        let head: String = content.chars().take(CONTENT_LOG_MAX_CHARS).collect();
        format!("{}... ({} bytes)", head, content.len())
    }
}

pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            team_id = %message.team_id,
            channel_id = %message.channel_id,
            user_id = %message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = message.kind.as_str(),
            content = %truncate_content(&message.content),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short"), "short");
        let long = "x".repeat(200);
        let truncated = truncate_content(&long);
        assert!(truncated.starts_with(&"x".repeat(120)));
        assert!(truncated.ends_with("... (200 bytes)"));
    }
}
