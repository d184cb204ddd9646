//! # acrobot-telegram
//!
//! Telegram transport: converts teloxide updates into classified [`acrobot_core::Message`]s,
//! implements [`acrobot_core::Bot`], and feeds the handler chain from a single dispatch loop.
//! No acronym logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{classify, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{build_teloxide_bot, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::{run_repl, spawn_dispatcher};
