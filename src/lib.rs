pub mod config;
pub mod context;
mod error;

pub use config::{ConfigError, ConfigStore, Configuration, LogFiles, DEFAULT_CONFIG_FILE};
pub use context::AppContext;
pub use error::Error;
