//! Assembly: loads the session from storage and builds the handler chain.

use acrobot_core::Bot;
use anyhow::Result;
use handler_chain::HandlerChain;
use handlers::{AmbientPolicy, AmbientScanner, CommandRouter, LoggingMiddleware, ScannerConfig};
use registry::AcronymSession;
use std::sync::Arc;
use storage::Store;
use tracing::info;

/// Loads the listen-set and the given team's acronyms. Other teams load on first reference.
pub async fn build_session(store: &Store, team_id: &str) -> Result<Arc<AcronymSession>> {
    let session = AcronymSession::load(
        Arc::new(store.teams.clone()),
        Arc::new(store.channels.clone()),
    )
    .await?;
    session.load_team(team_id).await?;
    info!(team_id = %team_id, acronyms = session.acronyms(team_id).await.len(), "Session loaded");
    Ok(Arc::new(session))
}

/// Logging middleware, then the command router, then the ambient scanner.
pub fn build_chain(
    store: &Store,
    session: Arc<AcronymSession>,
    bot: Arc<dyn Bot>,
    policy: AmbientPolicy,
) -> Result<HandlerChain> {
    let router = CommandRouter::new(session.clone(), bot.clone())?;
    let scanner = AmbientScanner::new(
        session,
        Arc::new(store.users.clone()),
        bot,
        ScannerConfig::with_policy(policy),
    );
    Ok(HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(Arc::new(router))
        .add_handler(Arc::new(scanner)))
}
