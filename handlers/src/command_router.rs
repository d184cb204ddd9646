//! Answers directly addressed messages: ping, define, delete, update, query and listen control.

use std::sync::Arc;

use acrobot_core::{AcroError, Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use async_trait::async_trait;
use registry::{AcronymSession, RegistryError};
use tracing::{debug, info, instrument};

use crate::patterns::{CommandPatterns, Intent, IntentMatch, ListenRequest};
use crate::replies;

/// Handler for direct messages and mentions. Ambient traffic and unrecognised text fall through with `Continue`.
pub struct CommandRouter {
    session: Arc<AcronymSession>,
    bot: Arc<dyn Bot>,
    patterns: CommandPatterns,
}

impl CommandRouter {
    pub fn new(session: Arc<AcronymSession>, bot: Arc<dyn Bot>) -> Result<Self> {
        let patterns = CommandPatterns::new()
            .map_err(|e| AcroError::Handler(HandlerError::InvalidPattern(e.to_string())))?;
        Ok(Self {
            session,
            bot,
            patterns,
        })
    }

    /// Runs the matched intent against the session and returns the reply text.
    async fn dispatch(&self, message: &Message, m: &IntentMatch) -> String {
        let team_id = message.team_id.as_str();
        match m.intent {
            Intent::Ping => replies::PONG.to_string(),
            Intent::Define => {
                let expansion = html_escape::decode_html_entities(m.expansion());
                match self.session.define(team_id, m.acronym(), &expansion).await {
                    Ok(_) => replies::NEW_ACRONYM.to_string(),
                    Err(e) => refusal(&e),
                }
            }
            Intent::Delete => match self.session.delete(team_id, m.acronym()).await {
                Ok(key) => replies::deleted(&key),
                Err(RegistryError::UnknownAcronym(_)) => replies::UNKNOWN_DELETE.to_string(),
                Err(e) => refusal(&e),
            },
            Intent::Update => {
                let expansion = html_escape::decode_html_entities(m.expansion());
                match self.session.update(team_id, m.acronym(), &expansion).await {
                    Ok(_) => replies::UPDATED.to_string(),
                    Err(e) => refusal(&e),
                }
            }
            Intent::Query => match self.session.lookup(team_id, m.acronym()).await {
                Ok((key, expansion)) => replies::stands_for(&key, &expansion),
                Err(e) => refusal(&e),
            },
            Intent::Listen => self.listen(&message.channel_id, m.acronym()).await,
        }
    }

    async fn listen(&self, channel_id: &str, token: &str) -> String {
        match ListenRequest::parse(token) {
            ListenRequest::Start => {
                self.session.start_listening(channel_id).await;
                replies::START_LISTENING.to_string()
            }
            ListenRequest::Stop => {
                self.session.stop_listening(channel_id).await;
                replies::STOP_LISTENING.to_string()
            }
            ListenRequest::AreYou => {
                if self.session.is_listening(channel_id).await {
                    replies::LISTENING.to_string()
                } else {
                    replies::NOT_LISTENING.to_string()
                }
            }
            ListenRequest::Unknown(action) => {
                info!(channel_id = %channel_id, action = %action, "Unknown listen action");
                replies::NOT_UNDERSTOOD.to_string()
            }
        }
    }
}

fn refusal(err: &RegistryError) -> String {
    info!(reason = %err, "Request refused");
    match err {
        RegistryError::DuplicateAcronym(key) => replies::duplicate(key),
        RegistryError::UnknownAcronym(_) => replies::UNKNOWN_QUERY.to_string(),
        RegistryError::EmptyAcronym(_) => replies::NOT_AN_ACRONYM.to_string(),
    }
}

#[async_trait]
impl Handler for CommandRouter {
    #[instrument(skip(self, message), fields(team_id = %message.team_id, user_id = %message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.kind.is_direct() {
            return Ok(HandlerResponse::Continue);
        }

        let Some(matched) = self.patterns.match_text(message.kind, message.content.trim()) else {
            debug!(kind = message.kind.as_str(), "No command pattern matched");
            return Ok(HandlerResponse::Continue);
        };

        info!(
            intent = matched.intent.as_str(),
            acronym = %matched.acronym(),
            "step: command matched"
        );

        let reply = self.dispatch(message, &matched).await;
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
