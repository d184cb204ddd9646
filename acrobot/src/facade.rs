//! What each CLI command does.

use acrobot_core::{init_tracing, Bot};
use acrobot_telegram::{build_teloxide_bot, run_repl, TelegramBotAdapter, TelegramConfig};
use anyhow::Result;
use std::sync::Arc;
use storage::{Repository, Store, UserRecord};
use tracing::{info, instrument};

use crate::assembly::{build_chain, build_session};
use crate::config::AcrobotConfig;

/// Main entry: init logging, open storage, load the session, build the chain, then run the REPL.
#[instrument(skip_all)]
pub async fn run_bot(config: AcrobotConfig, telegram: TelegramConfig) -> Result<()> {
    telegram.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        team_id = %config.team_id,
        ambient_policy = %config.ambient_policy,
        "Initializing bot"
    );

    let store = Store::open(&config.database_url).await?;
    let session = build_session(&store, &config.team_id).await?;

    let api_url = telegram.telegram_api_url.clone();
    let teloxide_bot = build_teloxide_bot(&telegram.bot_token, api_url.as_deref());
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone(), api_url));
    let chain = build_chain(&store, session, bot, config.ambient_policy)?;

    info!("Bot started successfully");
    run_repl(teloxide_bot, chain, config.team_id).await
}

/// A team's stored acronyms, sorted by key. An unknown team has none.
pub async fn list_acronyms(store: &Store, team_id: &str) -> Result<Vec<(String, String)>> {
    let record = store.teams.find_by_id(team_id).await?;
    Ok(record
        .map(|team| team.acronyms.into_iter().collect())
        .unwrap_or_default())
}

/// Stores (or replaces) a user's access token.
pub async fn set_user_token(store: &Store, user_id: &str, access_token: &str) -> Result<()> {
    store
        .users
        .save(&UserRecord::new(user_id, access_token))
        .await?;
    Ok(())
}
