//! Overwrite-if-present merging of a parsed config document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::Configuration;
use super::ConfigError;

/// A config document as read from disk. Every field is optional and unknown
/// keys are ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct ConfigOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(
        rename = "helpChannelID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    help_channel_id: Option<String>,
    #[serde(
        rename = "botHostName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    bot_host_name: Option<String>,
    #[serde(rename = "guildID", default, skip_serializing_if = "Option::is_none")]
    guild_id: Option<String>,
    #[serde(
        rename = "sysAdminTag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    sys_admin_tag: Option<String>,
    #[serde(rename = "logFiles", default, skip_serializing_if = "Option::is_none")]
    log_files: Option<LogFilesOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<BTreeMap<String, Option<Vec<String>>>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LogFilesOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    info_log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_log: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ConfigOverlay {
    /// Drops empty strings, empty role lists and empty sections so that only
    /// values meant to overwrite the live config remain.
    fn prune(self) -> Self {
        let log_files = self
            .log_files
            .map(|files| LogFilesOverlay {
                info_log: non_empty(files.info_log),
                error_log: non_empty(files.error_log),
            })
            .filter(|files| files.info_log.is_some() || files.error_log.is_some());

        let permissions = self
            .permissions
            .map(|groups| {
                groups
                    .into_iter()
                    .filter(|(_, roles)| roles.as_ref().is_some_and(|r| !r.is_empty()))
                    .collect::<BTreeMap<_, _>>()
            })
            .filter(|groups| !groups.is_empty());

        Self {
            prefix: non_empty(self.prefix),
            token: non_empty(self.token),
            help_channel_id: non_empty(self.help_channel_id),
            bot_host_name: non_empty(self.bot_host_name),
            guild_id: non_empty(self.guild_id),
            sys_admin_tag: non_empty(self.sys_admin_tag),
            log_files,
            permissions,
        }
    }
}

/// Merges `overlay` onto `base`, returning the merged configuration.
///
/// Objects are merged key by key (this covers `logFiles` and each permission
/// group); strings and role lists present in the overlay replace the base
/// value entirely. `base` is not modified.
pub(crate) fn merge(
    base: &Configuration,
    overlay: ConfigOverlay,
) -> Result<Configuration, ConfigError> {
    let overlay = serde_json::to_value(overlay.prune()).map_err(ConfigError::MergeError)?;
    let mut merged = serde_json::to_value(base).map_err(ConfigError::MergeError)?;

    if let (Value::Object(target), Value::Object(source)) = (&mut merged, overlay) {
        deep_merge(target, source);
    }

    serde_json::from_value(merged).map_err(ConfigError::MergeError)
}

fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                deep_merge(base_map, overlay_map);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
