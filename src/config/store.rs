use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use super::file::read_config_file;
use super::merge::merge;
use super::schema::Configuration;
use super::ConfigError;

/// Name of the config file loaded from the working directory by
/// [`ConfigStore::load_default`].
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Holds the live bot configuration.
///
/// A store starts out with [`Configuration::default`]. The application builds
/// one at startup, loads the config file into it once, and shares it (usually
/// through [`AppContext`](crate::AppContext)) with everything that reads
/// settings.
///
/// ## Example
///
/// ```no_run
/// use bot_config::ConfigStore;
///
/// let store = ConfigStore::new();
/// store.load("config.json")?;
///
/// let config = store.get();
/// println!("listening for '{}'", config.prefix);
/// # Ok::<(), bot_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Arc<Configuration>>,
}

impl ConfigStore {
    /// Creates a store holding the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON config file and merges it onto the current values.
    ///
    /// Only fields present and non-empty in the file are overwritten. On
    /// error the current configuration is left unchanged.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");

        let overlay = read_config_file(path)?;

        // Held across merge and publish so overlapping loads both apply.
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let merged = merge(&current, overlay)?;
        *current = Arc::new(merged);
        drop(current);

        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(())
    }

    /// Loads [`DEFAULT_CONFIG_FILE`] from the working directory.
    pub fn load_default(&self) -> Result<(), ConfigError> {
        self.load(DEFAULT_CONFIG_FILE)
    }

    /// Like [`load`](Self::load), but keeps the current values on failure.
    ///
    /// Returns `true` if the file was applied.
    pub fn load_or_default(&self, path: impl AsRef<Path>) -> bool {
        match self.load(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "using existing configuration");
                false
            }
        }
    }

    /// Returns a snapshot of the current configuration.
    ///
    /// Snapshots are not updated by later loads; call `get` again to see them.
    /// Components should fetch a fresh snapshot per use rather than keep one.
    pub fn get(&self) -> Arc<Configuration> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_new_store_holds_defaults() {
        let store = ConfigStore::new();
        assert_eq!(*store.get(), Configuration::default());
    }

    #[test]
    fn test_get_is_idempotent() {
        let store = ConfigStore::new();
        assert_eq!(store.get(), store.get());
    }

    #[test]
    fn test_load_prefix_only() {
        let store = ConfigStore::new();
        let file = config_file(r#"{"prefix": "?"}"#);

        store.load(file.path()).unwrap();

        let mut expected = Configuration::default();
        expected.prefix = "?".to_string();
        assert_eq!(*store.get(), expected);
    }

    #[test]
    fn test_load_log_file_and_permissions() {
        let store = ConfigStore::new();
        let file = config_file(
            r#"{
                "token": "secret",
                "logFiles": {"error_log": "custom.log"},
                "permissions": {"ban": ["SysAdmin"]}
            }"#,
        );

        store.load(file.path()).unwrap();
        let config = store.get();

        assert_eq!(config.token, "secret");
        assert_eq!(config.log_files.info_log, "info.log");
        assert_eq!(config.log_files.error_log, "custom.log");
        let groups: Vec<&str> = config.permissions.keys().map(String::as_str).collect();
        assert_eq!(groups, ["alias", "ban", "config"]);
    }

    #[test]
    fn test_empty_file_leaves_config_unchanged() {
        let store = ConfigStore::new();
        let file = config_file("");

        let result = store.load(file.path());

        assert!(matches!(result, Err(ConfigError::EmptyFile(_))));
        assert_eq!(*store.get(), Configuration::default());
    }

    #[test]
    fn test_invalid_json_leaves_config_unchanged() {
        let store = ConfigStore::new();
        let file = config_file(r#"{"prefix": "?", "#);

        let result = store.load(file.path());

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
        assert_eq!(*store.get(), Configuration::default());
    }

    #[test]
    fn test_wrong_shape_leaves_config_unchanged() {
        let store = ConfigStore::new();
        let file = config_file(r#"{"prefix": "?", "guildID": 291573897730588684}"#);

        let result = store.load(file.path());

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
        assert_eq!(*store.get(), Configuration::default());
    }

    #[test]
    fn test_missing_file() {
        let store = ConfigStore::new();
        let result = store.load("/nonexistent/path/config.json");

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_loads_accumulate() {
        let store = ConfigStore::new();
        store.load(config_file(r#"{"prefix": "?"}"#).path()).unwrap();
        store
            .load(config_file(r#"{"botHostName": "bot.example.com"}"#).path())
            .unwrap();

        let config = store.get();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.bot_host_name, "bot.example.com");
    }

    #[test]
    fn test_snapshot_is_not_updated_by_load() {
        let store = ConfigStore::new();
        let before = store.get();

        store.load(config_file(r#"{"prefix": "?"}"#).path()).unwrap();

        assert_eq!(before.prefix, "!");
        assert_eq!(store.get().prefix, "?");
    }

    #[test]
    fn test_load_or_default() {
        let store = ConfigStore::new();

        assert!(!store.load_or_default("/nonexistent/path/config.json"));
        assert_eq!(*store.get(), Configuration::default());

        assert!(store.load_or_default(config_file(r#"{"prefix": "?"}"#).path()));
        assert_eq!(store.get().prefix, "?");
    }

    #[test]
    fn test_concurrent_loads_both_apply() {
        let prefix = config_file(r#"{"prefix": "?"}"#);
        let host = config_file(r#"{"botHostName": "bot.example.com"}"#);

        for _ in 0..200 {
            let store = ConfigStore::new();
            std::thread::scope(|s| {
                s.spawn(|| store.load(prefix.path()).unwrap());
                s.spawn(|| store.load(host.path()).unwrap());
            });

            let config = store.get();
            assert_eq!(config.prefix, "?");
            assert_eq!(config.bot_host_name, "bot.example.com");
        }
    }

    #[test]
    fn test_null_document_is_a_no_op() {
        let store = ConfigStore::new();
        store.load(config_file("null").path()).unwrap();

        assert_eq!(*store.get(), Configuration::default());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let store = ConfigStore::new();
        let file = config_file(r#"{"token": "secret", "prefix": "a", "prefix": "b"}"#);

        store.load(file.path()).unwrap();

        let config = store.get();
        assert_eq!(config.prefix, "b");
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigStore>();
    }
}
