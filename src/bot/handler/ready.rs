//! Ready event handler for bot initialization.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Set the bot's presence
//! - Register the configured slash commands that do not exist on Discord yet

use dioxus_logger::tracing;
use serenity::all::{ActivityData, Context, OnlineStatus, Ready};
use std::path::Path;

use crate::service::command::registration::register_commands;

/// Custom status shown once the bot is connected.
const READY_STATUS: &str = "Ready for takeoff!";

/// Handles the ready event when the bot connects to Discord.
///
/// Fires again after every reconnect that starts a new session. Command registration
/// only creates missing commands, so repeating it is harmless.
///
/// # Arguments
/// - `command_path` - Directory holding the slash command descriptors
/// - `ctx` - Discord context for setting the presence and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(command_path: &Path, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_presence(
        Some(ActivityData::custom(READY_STATUS)),
        OnlineStatus::DoNotDisturb,
    );

    if let Err(e) = register_commands(&ctx.http, command_path).await {
        tracing::error!("Failed to register slash commands: {}", e);
    }
}
