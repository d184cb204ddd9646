//! # registry
//!
//! The acronym data the bot works on:
//!
//! - [`normalize`] – canonical acronym keys
//! - [`Registry`] – per-team key → expansion maps with the define/update/lookup/delete policy
//! - [`ListenSet`] – channels where ambient scanning is active
//! - [`AcronymSession`] – owns both for the life of the process, loads them from storage and writes every change through

mod error;
mod listen_set;
mod normalize;
mod registry;
mod session;

pub use error::RegistryError;
pub use listen_set::ListenSet;
pub use normalize::normalize;
pub use registry::{Registry, Upsert};
pub use session::AcronymSession;
