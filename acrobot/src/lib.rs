//! # acrobot
//!
//! Entry point crate: configuration, CLI, and the assembly of storage, session and handler chain.
//! **Public API:** [`run_bot`], [`list_acronyms`], [`set_user_token`], plus [`build_session`] and
//! [`build_chain`] for driving the pipeline without Telegram.

mod assembly;
mod cli;
mod config;
mod facade;

pub use assembly::{build_chain, build_session};
pub use cli::{Cli, Commands};
pub use config::AcrobotConfig;
pub use facade::{list_acronyms, run_bot, set_user_token};
