//! acrobot: entry point.

use acrobot::{list_acronyms, run_bot, set_user_token, AcrobotConfig, Cli, Commands};
use acrobot_telegram::TelegramConfig;
use anyhow::Result;
use clap::Parser;
use storage::Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AcrobotConfig::from_env()?;

    match cli.command {
        Commands::Run { token } => {
            let telegram = TelegramConfig::load(token)?;
            run_bot(config, telegram).await
        }
        Commands::List { team } => {
            let team_id = team.unwrap_or(config.team_id);
            let store = Store::open(&config.database_url).await?;
            let acronyms = list_acronyms(&store, &team_id).await?;
            if acronyms.is_empty() {
                println!("No acronyms stored for team '{}'", team_id);
            }
            for (key, expansion) in acronyms {
                println!("{}\t{}", key, expansion);
            }
            Ok(())
        }
        Commands::SetUserToken { user, token } => {
            let store = Store::open(&config.database_url).await?;
            set_user_token(&store, &user, &token).await?;
            println!("Stored access token for user '{}'", user);
            Ok(())
        }
    }
}
