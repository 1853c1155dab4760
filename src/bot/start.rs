use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::{
    bot::handler::Handler,
    config::Config,
    error::AppError,
    service::command::{assign::AssignCommandHandler, CommandRegistry},
};

/// Starts the Discord bot and runs it until the gateway connection ends.
///
/// # Arguments
/// - `config` - Application configuration
///
/// # Returns
/// - `Ok(())` if the bot shuts down cleanly
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(config: &Config) -> Result<(), AppError> {
    // GUILDS keeps channels in the cache, GUILD_VOICE_STATES delivers voice updates and
    // fills the voice states used for occupancy. Neither is privileged.
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_VOICE_STATES;

    let mut commands = CommandRegistry::new();
    commands.register(Arc::new(AssignCommandHandler));

    let handler = Handler::new(
        config.dynamic_channel_name.clone(),
        commands,
        config.command_path.clone(),
    );

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Blocks until shutdown
    client.start().await?;

    Ok(())
}
