//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acrobot")]
#[command(about = "Acronym bot CLI: run, list, set-user-token", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print a team's stored acronyms, sorted by key.
    List {
        /// Team id; defaults to ACROBOT_TEAM_ID.
        #[arg(long)]
        team: Option<String>,
    },
    /// Store the access token used to edit a user's messages in place (annotate policy).
    SetUserToken {
        #[arg(long)]
        user: String,
        #[arg(long)]
        token: String,
    },
}
