//! Creates slash commands on Discord from the JSON descriptors on disk.
//!
//! Registration only ever adds commands: for each scope (global, or a single guild)
//! the commands already registered remotely are fetched, and descriptors whose name is
//! not among them are created. Existing commands are neither updated nor deleted.

use dioxus_logger::tracing;
use serenity::all::{
    ChannelType, Command, CommandOptionType, CreateCommand, CreateCommandOption, GuildId,
    InstallationContext, InteractionContext, Permissions,
};
use serenity::http::Http;
use std::{
    collections::{BTreeMap, HashSet},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::{command::CommandConfigError, AppError},
    model::command::{CommandChoiceConfig, CommandConfig, CommandConfigFile, CommandOptionConfig},
};

/// Registers every command described in `dir` that does not exist on Discord yet.
///
/// Failures for a single scope are logged and do not prevent the other scopes from
/// being registered.
pub async fn register_commands(http: &Http, dir: &Path) -> Result<(), AppError> {
    let configs = load_command_configs(dir).await?;

    if configs.is_empty() {
        tracing::info!("No slash commands configured in {}", dir.display());
        return Ok(());
    }

    let mut scopes: BTreeMap<Option<u64>, Vec<CommandConfig>> = BTreeMap::new();
    for config in configs {
        let scope = config.guild_id.filter(|_| config.is_guild_command());
        scopes.entry(scope).or_default().push(config);
    }

    for (scope, configs) in scopes {
        let result = match scope {
            None => register_global(http, &configs).await,
            Some(guild_id) => register_guild(http, GuildId::new(guild_id), &configs).await,
        };

        if let Err(e) = result {
            tracing::error!("Failed to register slash commands for scope {:?}: {}", scope, e);
        }
    }

    Ok(())
}

async fn register_global(http: &Http, configs: &[CommandConfig]) -> Result<(), AppError> {
    let existing: Vec<String> = Command::get_global_commands(http)
        .await?
        .into_iter()
        .map(|command| command.name)
        .collect();

    for config in missing_commands(configs, &existing) {
        let command = Command::create_global_command(http, build_command(config)).await?;
        tracing::info!("Created global slash command /{} ({})", command.name, command.id);
    }

    Ok(())
}

async fn register_guild(
    http: &Http,
    guild_id: GuildId,
    configs: &[CommandConfig],
) -> Result<(), AppError> {
    let existing: Vec<String> = guild_id
        .get_commands(http)
        .await?
        .into_iter()
        .map(|command| command.name)
        .collect();

    for config in missing_commands(configs, &existing) {
        let command = guild_id.create_command(http, build_command(config)).await?;
        tracing::info!(
            "Created slash command /{} ({}) in guild {}",
            command.name,
            command.id,
            guild_id
        );
    }

    Ok(())
}

/// Loads all `*.json` descriptor files of a directory, in file name order.
///
/// A missing directory yields no commands. Unreadable or invalid files are logged and
/// skipped.
///
/// # Returns
/// - `Ok(Vec<CommandConfig>)` - Descriptors of all valid files
/// - `Err(AppError::CommandConfigErr)` - The directory exists but cannot be listed
pub async fn load_command_configs(dir: &Path) -> Result<Vec<CommandConfig>, AppError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Command directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CommandConfigError::Read {
                path: dir.to_path_buf(),
                source,
            }
            .into())
        }
    };

    let mut paths = Vec::new();
    loop {
        let entry = entries
            .next_entry()
            .await
            .map_err(|source| CommandConfigError::Read {
                path: dir.to_path_buf(),
                source,
            })?;
        let Some(entry) = entry else {
            break;
        };

        let path = entry.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut configs = Vec::new();
    for path in paths {
        match read_command_file(path).await {
            Ok(file_configs) => configs.extend(file_configs),
            Err(e) => tracing::error!("{}", e),
        }
    }

    Ok(configs)
}

async fn read_command_file(path: PathBuf) -> Result<Vec<CommandConfig>, CommandConfigError> {
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(source) => return Err(CommandConfigError::Read { path, source }),
    };

    match serde_json::from_str::<CommandConfigFile>(&content) {
        Ok(file) => Ok(file.into_configs()),
        Err(source) => Err(CommandConfigError::Parse { path, source }),
    }
}

/// Selects the descriptors whose name is not registered yet.
///
/// Descriptors repeating a name within `configs` are only selected once.
pub fn missing_commands<'a>(
    configs: &'a [CommandConfig],
    existing: &[String],
) -> Vec<&'a CommandConfig> {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();

    configs
        .iter()
        .filter(|config| seen.insert(config.name.as_str()))
        .collect()
}

/// Converts a descriptor into serenity's command builder.
pub fn build_command(config: &CommandConfig) -> CreateCommand {
    let mut command = CreateCommand::new(&config.name).description(&config.description);

    for (locale, name) in &config.name_localizations {
        command = command.name_localized(locale, name);
    }
    for (locale, description) in &config.description_localizations {
        command = command.description_localized(locale, description);
    }

    if let Some(nsfw) = config.is_nsfw {
        command = command.nsfw(nsfw);
    }

    if !config.default_member_permissions.is_empty() {
        let permissions = config
            .default_member_permissions
            .iter()
            .filter_map(|name| parse_named(name, "permission", parse_permission))
            .fold(Permissions::empty(), |all, permission| all | permission);
        command = command.default_member_permissions(permissions);
    } else if config.is_default_permission == Some(false) {
        // Only administrators may use the command until permissions are granted
        command = command.default_member_permissions(Permissions::empty());
    }

    let contexts: Vec<InteractionContext> = config
        .context_types
        .iter()
        .filter_map(|name| parse_named(name, "context type", parse_interaction_context))
        .collect();
    if !contexts.is_empty() {
        command = command.contexts(contexts);
    }

    let integration_types: Vec<InstallationContext> = config
        .integration_types
        .iter()
        .filter_map(|name| parse_named(name, "integration type", parse_installation_context))
        .collect();
    if !integration_types.is_empty() {
        command = command.integration_types(integration_types);
    }

    for option in &config.options {
        if let Some(option) = build_option(option) {
            command = command.add_option(option);
        }
    }

    command
}

fn build_option(config: &CommandOptionConfig) -> Option<CreateCommandOption> {
    let kind = parse_named(&config.kind, "option type", parse_option_type)?;

    let mut option = CreateCommandOption::new(kind, &config.name, &config.description);

    for (locale, name) in &config.name_localizations {
        option = option.name_localized(locale, name);
    }
    for (locale, description) in &config.description_localizations {
        option = option.description_localized(locale, description);
    }

    if let Some(required) = config.is_required {
        option = option.required(required);
    }
    if let Some(autocomplete) = config.is_autocomplete {
        option = option.set_autocomplete(autocomplete);
    }
    if let Some(min) = config.min_value {
        option = option.min_number_value(min);
    }
    if let Some(max) = config.max_value {
        option = option.max_number_value(max);
    }
    if let Some(min) = config.min_length {
        option = option.min_length(min);
    }
    if let Some(max) = config.max_length {
        option = option.max_length(max);
    }

    let channel_types: Vec<ChannelType> = config
        .channel_types
        .iter()
        .filter_map(|name| parse_named(name, "channel type", parse_channel_type))
        .collect();
    if !channel_types.is_empty() {
        option = option.channel_types(channel_types);
    }

    for choice in &config.choices {
        option = add_choice(option, kind, choice);
    }

    for sub_option in &config.options {
        if let Some(sub_option) = build_option(sub_option) {
            option = option.add_sub_option(sub_option);
        }
    }

    Some(option)
}

fn add_choice(
    option: CreateCommandOption,
    kind: CommandOptionType,
    choice: &CommandChoiceConfig,
) -> CreateCommandOption {
    let locales = choice
        .name_localizations
        .iter()
        .map(|(locale, name)| (locale.as_str(), name.as_str()));

    let value = match &choice.value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    match kind {
        CommandOptionType::String => option.add_string_choice_localized(&choice.name, value, locales),
        CommandOptionType::Integer => match value.trim().parse::<i32>() {
            Ok(value) => option.add_int_choice_localized(&choice.name, value, locales),
            Err(_) => {
                tracing::warn!("Skipping choice '{}': '{}' is no integer", choice.name, value);
                option
            }
        },
        CommandOptionType::Number => match value.trim().parse::<f64>() {
            Ok(value) => option.add_number_choice_localized(&choice.name, value, locales),
            Err(_) => {
                tracing::warn!("Skipping choice '{}': '{}' is no number", choice.name, value);
                option
            }
        },
        _ => {
            tracing::warn!(
                "Skipping choice '{}': options of type {:?} have no choices",
                choice.name,
                kind
            );
            option
        }
    }
}

/// Parses a configured enum name, warning about unknown names.
fn parse_named<T>(name: &str, what: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(&normalize(name));
    if parsed.is_none() {
        tracing::warn!("Ignoring unknown {} '{}'", what, name);
    }
    parsed
}

/// Lowercases a name and strips `_` and `-`, so `ManageRoles`, `manage_roles` and
/// `MANAGE-ROLES` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_option_type(name: &str) -> Option<CommandOptionType> {
    Some(match name {
        "subcommand" => CommandOptionType::SubCommand,
        "subcommandgroup" => CommandOptionType::SubCommandGroup,
        "string" => CommandOptionType::String,
        "integer" => CommandOptionType::Integer,
        "boolean" => CommandOptionType::Boolean,
        "user" => CommandOptionType::User,
        "channel" => CommandOptionType::Channel,
        "role" => CommandOptionType::Role,
        "mentionable" => CommandOptionType::Mentionable,
        "number" => CommandOptionType::Number,
        "attachment" => CommandOptionType::Attachment,
        _ => return None,
    })
}

fn parse_channel_type(name: &str) -> Option<ChannelType> {
    Some(match name {
        "text" => ChannelType::Text,
        "dm" | "private" => ChannelType::Private,
        "voice" => ChannelType::Voice,
        "groupdm" => ChannelType::GroupDm,
        "category" => ChannelType::Category,
        "news" => ChannelType::News,
        "newsthread" => ChannelType::NewsThread,
        "publicthread" => ChannelType::PublicThread,
        "privatethread" => ChannelType::PrivateThread,
        "stage" => ChannelType::Stage,
        "directory" => ChannelType::Directory,
        "forum" => ChannelType::Forum,
        _ => return None,
    })
}

fn parse_interaction_context(name: &str) -> Option<InteractionContext> {
    Some(match name {
        "guild" => InteractionContext::Guild,
        "botdm" => InteractionContext::BotDm,
        "privatechannel" => InteractionContext::PrivateChannel,
        _ => return None,
    })
}

fn parse_installation_context(name: &str) -> Option<InstallationContext> {
    Some(match name {
        "guild" | "guildinstall" => InstallationContext::Guild,
        "user" | "userinstall" => InstallationContext::User,
        _ => return None,
    })
}

fn parse_permission(name: &str) -> Option<Permissions> {
    Permissions::all()
        .iter_names()
        .find(|(flag, _)| normalize(flag) == name)
        .map(|(_, permission)| permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str) -> CommandConfig {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "description": format!("The {} command", name),
        }))
        .expect("valid descriptor")
    }

    /// Tests the diff against already registered commands.
    ///
    /// Expected: only unregistered names, each once, in descriptor order
    #[test]
    fn selects_only_missing_commands() {
        let configs = vec![config("assign"), config("news"), config("ping"), config("news")];
        let existing = vec!["assign".to_string(), "unrelated".to_string()];

        let missing: Vec<&str> = missing_commands(&configs, &existing)
            .into_iter()
            .map(|config| config.name.as_str())
            .collect();

        assert_eq!(missing, vec!["news", "ping"]);
    }

    /// Tests that nothing is selected when every command exists.
    ///
    /// Expected: empty selection
    #[test]
    fn selects_nothing_when_all_registered() {
        let configs = vec![config("assign")];

        assert!(missing_commands(&configs, &["assign".to_string()]).is_empty());
    }

    /// Tests enum name parsing across spellings.
    ///
    /// Expected: case, `_` and `-` are ignored; unknown names yield None
    #[test]
    fn parses_enum_names_loosely() {
        assert_eq!(
            parse_named("SubCommand_Group", "option type", parse_option_type),
            Some(CommandOptionType::SubCommandGroup)
        );
        assert_eq!(
            parse_named("role", "option type", parse_option_type),
            Some(CommandOptionType::Role)
        );
        assert_eq!(
            parse_named("VOICE", "channel type", parse_channel_type),
            Some(ChannelType::Voice)
        );
        assert_eq!(
            parse_named("Bot-DM", "context type", parse_interaction_context),
            Some(InteractionContext::BotDm)
        );
        assert_eq!(parse_named("Emoji", "option type", parse_option_type), None);
    }

    /// Tests permission names in both descriptor and flag spelling.
    ///
    /// Expected: both resolve to the same flag
    #[test]
    fn parses_permission_names() {
        assert_eq!(
            parse_named("ManageRoles", "permission", parse_permission),
            Some(Permissions::MANAGE_ROLES)
        );
        assert_eq!(
            parse_named("MANAGE_CHANNELS", "permission", parse_permission),
            Some(Permissions::MANAGE_CHANNELS)
        );
        assert_eq!(parse_named("FlyShips", "permission", parse_permission), None);
    }

    /// Tests loading descriptors from a directory that does not exist.
    ///
    /// Expected: Ok with no commands
    #[tokio::test]
    async fn missing_directory_yields_no_commands() -> Result<(), AppError> {
        let dir = std::env::temp_dir().join("rocket-bot-no-such-command-dir");

        let configs = load_command_configs(&dir).await?;

        assert!(configs.is_empty());
        Ok(())
    }

    /// Tests loading single and array descriptor files while skipping invalid ones.
    ///
    /// Expected: commands of both valid files in file name order, other files ignored
    #[tokio::test]
    async fn loads_descriptor_files() -> Result<(), AppError> {
        let dir = std::env::temp_dir().join(format!("rocket-bot-commands-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir)
            .await
            .expect("create temp dir");

        tokio::fs::write(
            dir.join("a_assign.json"),
            r#"{ "name": "assign", "description": "Assign a role", "guildId": "42" }"#,
        )
        .await
        .expect("write file");
        tokio::fs::write(
            dir.join("b_more.json"),
            r#"[{ "name": "news", "description": "News" }, { "name": "ping", "description": "Ping" }]"#,
        )
        .await
        .expect("write file");
        tokio::fs::write(dir.join("c_broken.json"), "{ not json")
            .await
            .expect("write file");
        tokio::fs::write(dir.join("notes.txt"), "ignored")
            .await
            .expect("write file");

        let configs = load_command_configs(&dir).await;
        tokio::fs::remove_dir_all(&dir).await.expect("remove temp dir");
        let configs = configs?;

        let names: Vec<&str> = configs.iter().map(|config| config.name.as_str()).collect();
        assert_eq!(names, vec!["assign", "news", "ping"]);
        assert_eq!(configs[0].guild_id, Some(42));
        assert!(configs[0].is_guild_command());
        assert!(!configs[1].is_guild_command());

        Ok(())
    }
}
