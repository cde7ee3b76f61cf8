//! Reading and parsing the JSON config file.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::merge::ConfigOverlay;
use super::ConfigError;

/// Reads a config file and parses it into an overlay.
///
/// The file must exist and be non-empty. Unknown keys are ignored, but known
/// keys must have the expected shape. A repeated key keeps its last value and
/// a `null` document is treated as `{}`.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigOverlay, ConfigError> {
    let contents = std::fs::read(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if contents.is_empty() {
        return Err(ConfigError::EmptyFile(path.to_path_buf()));
    }

    let parse_error = |e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    };

    let document = match serde_json::from_slice::<Value>(&contents).map_err(parse_error)? {
        Value::Null => return Ok(ConfigOverlay::default()),
        document => serde_json::from_value::<Map<String, Value>>(document).map_err(parse_error)?,
    };

    ConfigOverlay::deserialize(Value::Object(document)).map_err(parse_error)
}
