//! Configuration loading and management.

mod error;
mod file;
mod merge;
mod schema;
mod store;

pub use error::ConfigError;
pub use schema::{Configuration, LogFiles};
pub use store::{ConfigStore, DEFAULT_CONFIG_FILE};
