//! REPL runner: converts teloxide messages to core Messages and queues them for a single
//! dispatch loop, so the handler chain sees one message at a time in arrival order.

use acrobot_core::{Message, ToCoreMessage};
use anyhow::Result;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts the dispatch loop. Messages sent on the returned queue are handled strictly one after
/// another; the loop ends when every sender is dropped.
pub fn spawn_dispatcher(handler_chain: HandlerChain) -> (mpsc::UnboundedSender<Message>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let worker = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            info!(
                user_id = %message.user.id,
                channel_id = %message.channel_id,
                message_id = %message.id,
                kind = message.kind.as_str(),
                "step: processing message (handler chain started)"
            );
            if let Err(e) = handler_chain.handle(&message).await {
                error!(error = %e, user_id = %message.user.id, "Handler chain failed");
            }
        }
        debug!("Dispatch queue closed");
    });
    (tx, worker)
}

/// Runs the Telegram REPL with the given handler chain. Looks up the bot's own username first so
/// mentions can be recognised; every message is attributed to `team_id`.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain, team_id: String) -> Result<()> {
    let bot_username = match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone();
            info!(username = ?username, "Bot username set before repl");
            username
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; only private chats and replies will be treated as addressed");
            None
        }
    };

    let (queue, worker) = spawn_dispatcher(handler_chain);

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let queue = queue.clone();
        let bot_username = bot_username.clone();
        let team_id = team_id.clone();

        async move {
            if msg.text().is_none() {
                debug!(chat_id = msg.chat.id.0, "Skipping non-text message");
                return respond(());
            }

            let core_msg =
                TelegramMessageWrapper::new(&msg, bot_username.as_deref(), &team_id).to_core();
            info!(
                user_id = %core_msg.user.id,
                channel_id = %core_msg.channel_id,
                kind = core_msg.kind.as_str(),
                "Received message"
            );
            if queue.send(core_msg).is_err() {
                error!("Dispatch loop is gone; dropping message");
            }
            respond(())
        }
    })
    .await;

    worker.abort();
    info!("Bot stopped");
    Ok(())
}
