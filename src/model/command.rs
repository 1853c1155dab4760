//! Slash command descriptors loaded from JSON configuration files.
//!
//! Descriptors mirror the shape of Discord's application command payload but use
//! human-readable enum names (`"Role"`, `"ManageRoles"`, `"Guild"`) instead of numeric
//! codes. Conversion into serenity builders happens in
//! `service::command::registration`.

use serde::Deserialize;
use std::collections::HashMap;

/// One slash command. Commands with a `guild_id` are registered per guild, all others
/// globally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfig {
    pub name: String,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub is_default_permission: Option<bool>,
    #[serde(default)]
    pub is_nsfw: Option<bool>,
    #[serde(default)]
    pub default_member_permissions: Vec<String>,
    #[serde(default)]
    pub integration_types: Vec<String>,
    #[serde(default)]
    pub context_types: Vec<String>,
    #[serde(default)]
    pub options: Vec<CommandOptionConfig>,
    #[serde(default)]
    pub name_localizations: HashMap<String, String>,
    #[serde(default)]
    pub description_localizations: HashMap<String, String>,
}

impl CommandConfig {
    pub fn is_guild_command(&self) -> bool {
        self.guild_id.is_some_and(|id| id != 0)
    }
}

/// An option (argument, subcommand or subcommand group) of a slash command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOptionConfig {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_required: Option<bool>,
    #[serde(default)]
    pub is_autocomplete: Option<bool>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub min_length: Option<u16>,
    #[serde(default)]
    pub max_length: Option<u16>,
    #[serde(default)]
    pub channel_types: Vec<String>,
    #[serde(default)]
    pub options: Vec<CommandOptionConfig>,
    #[serde(default)]
    pub choices: Vec<CommandChoiceConfig>,
    #[serde(default)]
    pub name_localizations: HashMap<String, String>,
    #[serde(default)]
    pub description_localizations: HashMap<String, String>,
}

/// A fixed choice of a string, integer or number option.
///
/// `value` is interpreted according to the parent option's type; values that do not
/// fit the type are skipped during registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandChoiceConfig {
    pub name: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub name_localizations: HashMap<String, String>,
}

/// Accepts a snowflake either as a JSON number or as a string, the latter being how
/// Discord itself serializes IDs.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Number(u64),
        Text(String),
    }

    match Option::<Snowflake>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Snowflake::Number(id)) => Ok(Some(id)),
        Some(Snowflake::Text(text)) => text.parse::<u64>().map(Some).map_err(D::Error::custom),
    }
}

/// Contents of a descriptor file: a single command or a list of commands.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CommandConfigFile {
    Many(Vec<CommandConfig>),
    One(Box<CommandConfig>),
}

impl CommandConfigFile {
    pub fn into_configs(self) -> Vec<CommandConfig> {
        match self {
            Self::Many(configs) => configs,
            Self::One(config) => vec![*config],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests parsing a single descriptor with nested options and choices.
    ///
    /// Expected: Ok with all fields populated and defaults for omitted ones
    #[test]
    fn parses_single_descriptor() -> Result<(), serde_json::Error> {
        let file: CommandConfigFile = serde_json::from_value(serde_json::json!({
            "name": "assign",
            "description": "Assign yourself a role",
            "guildId": 1234,
            "contextTypes": ["Guild"],
            "nameLocalizations": { "de": "zuweisen" },
            "options": [{
                "name": "role",
                "description": "The role",
                "type": "Role",
                "isRequired": true
            }]
        }))?;

        let configs = file.into_configs();
        assert_eq!(configs.len(), 1);

        let config = &configs[0];
        assert_eq!(config.name, "assign");
        assert!(config.is_guild_command());
        assert_eq!(config.context_types, vec!["Guild".to_string()]);
        assert_eq!(config.name_localizations.get("de").map(String::as_str), Some("zuweisen"));
        assert_eq!(config.options[0].kind, "Role");
        assert_eq!(config.options[0].is_required, Some(true));
        assert!(config.options[0].choices.is_empty());
        assert!(config.default_member_permissions.is_empty());

        Ok(())
    }

    /// Tests parsing a file holding several global descriptors.
    ///
    /// Expected: Ok with every descriptor returned in file order
    #[test]
    fn parses_descriptor_list() -> Result<(), serde_json::Error> {
        let file: CommandConfigFile = serde_json::from_value(serde_json::json!([
            { "name": "ping", "description": "Ping" },
            { "name": "pong", "description": "Pong", "guildId": 0 },
            { "name": "pang", "description": "Pang", "guildId": "987654321098765432" }
        ]))?;

        let configs = file.into_configs();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[1].name, "pong");
        assert!(!configs[0].is_guild_command());
        assert!(!configs[1].is_guild_command());
        assert_eq!(configs[2].guild_id, Some(987654321098765432));

        Ok(())
    }

    /// Tests that a descriptor without a description is rejected.
    ///
    /// Expected: Err
    #[test]
    fn rejects_descriptor_without_description() {
        let result = serde_json::from_value::<CommandConfigFile>(serde_json::json!({
            "name": "broken"
        }));

        assert!(result.is_err());
    }
}
