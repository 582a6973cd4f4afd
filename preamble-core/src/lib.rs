//! Preamble core library — domain types, format constants, configuration.
//!
//! - [`types`] — [`Preamble`], [`FileSnapshot`], [`SyncOutcome`] and the
//!   literal markers of the preamble format
//! - [`config`] — [`SyncConfig`] load with defaults
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::SyncConfig;
pub use error::ConfigError;
pub use types::{FileSnapshot, Preamble, PreambleDate, SyncOutcome, Title};
