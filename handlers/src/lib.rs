//! # Handlers for the acronym bot
//!
//! - [`CommandRouter`] answers directly addressed messages using the ordered [`CommandPatterns`].
//! - [`AmbientScanner`] watches listening channels and explains acronyms it recognises.
//! - [`LoggingMiddleware`] logs every event around the chain.

mod ambient_scanner;
mod command_router;
mod logging;
mod patterns;
pub mod replies;
mod scanner;

#[cfg(test)]
mod test;

pub use ambient_scanner::AmbientScanner;
pub use command_router::CommandRouter;
pub use logging::LoggingMiddleware;
pub use patterns::{CommandPatterns, Intent, IntentMatch, ListenRequest};
pub use scanner::{
    annotate_text, announce_text, scan, AmbientPolicy, ScannerConfig, DEFAULT_STOP_WORDS,
};
