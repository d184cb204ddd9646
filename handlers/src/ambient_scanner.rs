//! Watches listening channels and explains recognised acronyms, by reply or by in-place edit.

use std::collections::BTreeMap;
use std::sync::Arc;

use acrobot_core::{Bot, Handler, HandlerResponse, InteractionKind, Message, Result};
use async_trait::async_trait;
use registry::AcronymSession;
use storage::{Repository, UserRecord};
use tracing::{debug, info, instrument, warn};

use crate::scanner::{annotate_text, announce_text, scan, AmbientPolicy, ScannerConfig};

pub struct AmbientScanner {
    session: Arc<AcronymSession>,
    users: Arc<dyn Repository<UserRecord>>,
    bot: Arc<dyn Bot>,
    config: ScannerConfig,
}

impl AmbientScanner {
    pub fn new(
        session: Arc<AcronymSession>,
        users: Arc<dyn Repository<UserRecord>>,
        bot: Arc<dyn Bot>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            session,
            users,
            bot,
            config,
        }
    }

    /// Edits the sender's message in place. Returns false when the sender has no usable credential,
    /// a match cannot be placed in the text, or the edit fails, so the caller can announce instead.
    async fn try_annotate(
        &self,
        message: &Message,
        matches: &[String],
        acronyms: &BTreeMap<String, String>,
    ) -> bool {
        let user = match self.users.find_by_id(&message.user.id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = %message.user.id, "No access token for sender");
                return false;
            }
            Err(e) => {
                warn!(user_id = %message.user.id, error = %e, "Failed to look up sender");
                return false;
            }
        };

        let Some(annotated) = annotate_text(&message.content, matches, acronyms) else {
            debug!(message_id = %message.id, matches = ?matches, "Could not place every annotation");
            return false;
        };
        match self
            .bot
            .update_message(&user.access_token, &message.channel_id, &message.id, &annotated)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(message_id = %message.id, error = %e, "In-place edit failed");
                false
            }
        }
    }
}

#[async_trait]
impl Handler for AmbientScanner {
    #[instrument(skip(self, message), fields(team_id = %message.team_id, channel_id = %message.channel_id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != InteractionKind::Ambient
            || !self.session.is_listening(&message.channel_id).await
        {
            return Ok(HandlerResponse::Continue);
        }

        let acronyms = self.session.acronyms(&message.team_id).await;
        let matches = scan(&message.content, &acronyms, &self.config.stop_words);
        if matches.is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        info!(matches = ?matches, policy = %self.config.policy, "step: acronyms detected");

        if self.config.policy == AmbientPolicy::Annotate
            && self.try_annotate(message, &matches, &acronyms).await
        {
            return Ok(HandlerResponse::Stop);
        }

        let reply = announce_text(&matches, &acronyms);
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
