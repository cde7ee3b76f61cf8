//! Application context for sharing the configuration with bot components.

use std::sync::Arc;

use crate::config::{ConfigStore, Configuration};
use crate::Error;

/// Central application context handed to every component that reads
/// settings.
///
/// Cloning the context is cheap; all clones share one [`ConfigStore`].
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use bot_config::{AppContext, ConfigStore};
///
/// let store = Arc::new(ConfigStore::new());
/// store.load_default()?;
///
/// let ctx = AppContext::builder().with_store(store).build()?;
///
/// let config = ctx.config();
/// println!("prefix: {}", config.prefix);
/// # Ok::<(), bot_config::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    store: Arc<ConfigStore>,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder { store: None }
    }

    /// Returns a snapshot of the current configuration.
    pub fn config(&self) -> Arc<Configuration> {
        self.store.get()
    }

    /// Returns the shared config store.
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    store: Option<Arc<ConfigStore>>,
}

impl AppContextBuilder {
    /// Attaches the config store to the application context.
    pub fn with_store(mut self, store: Arc<ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the `AppContext`.
    ///
    /// Returns an error if no config store was provided.
    pub fn build(self) -> Result<AppContext, Error> {
        Ok(AppContext {
            store: self.store.ok_or(Error::MissingConfig)?,
        })
    }
}
