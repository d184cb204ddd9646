//! # acrobot-core
//!
//! Core types and traits for the acronym bot: [`Bot`], [`Handler`], [`Middleware`], message and user
//! types, and tracing initialization. Transport-agnostic; used by handler-chain, handlers and acrobot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{AcroError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Handler, HandlerResponse, InteractionKind, Message, Middleware, ToCoreMessage, ToCoreUser,
    User,
};
