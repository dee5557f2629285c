//! Core of the SMM order bot.
//!
//! This crate is framework-agnostic. Telegram lives behind the messaging port in
//! the adapter crate; the SMM panel and the key store live behind their own traits.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod router;
pub mod smm;
pub mod store;

pub use errors::{Error, Result};
