//! The bot configuration record and its built-in defaults.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime settings for the bot.
///
/// Serialized field names match the keys of `config.json`.
///
/// Values handed out by [`ConfigStore::get`](crate::ConfigStore::get) and
/// [`AppContext::config`](crate::AppContext::config) are snapshots that a
/// later load does not change. Fetch a fresh one for each use instead of
/// storing it in a long-lived component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// String that prefixes every command the bot listens for.
    pub prefix: String,

    /// Discord bot user token.
    pub token: String,

    /// Channel that help requests are forwarded to.
    #[serde(rename = "helpChannelID")]
    pub help_channel_id: String,

    /// Address the bot's `/help` endpoint is reachable at.
    #[serde(rename = "botHostName")]
    pub bot_host_name: String,

    #[serde(rename = "guildID")]
    pub guild_id: String,

    /// Mention that notifies every sysadmin when included in a message.
    #[serde(rename = "sysAdminTag")]
    pub sys_admin_tag: String,

    #[serde(rename = "logFiles")]
    pub log_files: LogFiles,

    /// Roles allowed to run each group of commands.
    pub permissions: BTreeMap<String, Vec<String>>,
}

/// Paths of the bot's log files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFiles {
    pub info_log: String,
    pub error_log: String,
}

const ALIAS_ROLES: &[&str] = &[
    "Chairperson",
    "Equipments Officer",
    "Events Officer",
    "Finance Officer",
    "HLM",
    "PRO",
    "Secretary",
    "SysAdmin",
];

const CONFIG_ROLES: &[&str] = &["SysAdmin", "HLM"];

fn roles(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

impl Default for LogFiles {
    fn default() -> Self {
        Self {
            info_log: "info.log".to_string(),
            error_log: "error.log".to_string(),
        }
    }
}

impl Default for Configuration {
    /// Placeholder values that let the bot start, or at least warn, when no
    /// config file is present.
    fn default() -> Self {
        let mut permissions = BTreeMap::new();
        permissions.insert("alias".to_string(), roles(ALIAS_ROLES));
        permissions.insert("config".to_string(), roles(CONFIG_ROLES));

        Self {
            prefix: "!".to_string(),
            token: "warn".to_string(),
            help_channel_id: "warn".to_string(),
            bot_host_name: "0.0.0.0:4201".to_string(),
            guild_id: "291573897730588684".to_string(),
            sys_admin_tag: "<@&318907623476822016>".to_string(),
            log_files: LogFiles::default(),
            permissions,
        }
    }
}

impl Configuration {
    /// Returns the roles in a permission group, or an empty slice when the
    /// group is not defined.
    pub fn roles_for(&self, group: &str) -> &[String] {
        self.permissions
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if any of `roles` belongs to the permission group.
    pub fn is_permitted<S: AsRef<str>>(&self, group: &str, roles: &[S]) -> bool {
        let allowed = self.roles_for(group);
        roles
            .iter()
            .any(|role| allowed.iter().any(|a| a == role.as_ref()))
    }

    /// Renders the configuration as indented JSON.
    ///
    /// The token is included verbatim, so the result must be treated as a
    /// secret.
    pub fn to_display_string(&self) -> String {
        // Only string fields and string maps; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
