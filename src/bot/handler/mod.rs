use serenity::all::{Context, EventHandler, Interaction, Ready, VoiceState};
use serenity::async_trait;
use std::{path::PathBuf, sync::Arc};

use crate::service::{command::CommandRegistry, voice_pool::lock::CategoryLocks};

pub mod interaction;
pub mod ready;
pub mod voice_state;

/// Discord bot event handler
pub struct Handler {
    /// Name given to voice channels created by the dynamic voice pool.
    pub channel_name: String,
    /// Serializes voice pool passes per category across all events.
    pub locks: CategoryLocks,
    pub commands: Arc<CommandRegistry>,
    /// Directory holding the slash command descriptors registered on ready.
    pub command_path: PathBuf,
}

impl Handler {
    pub fn new(channel_name: String, commands: CommandRegistry, command_path: PathBuf) -> Self {
        Self {
            channel_name,
            locks: CategoryLocks::new(),
            commands: Arc::new(commands),
            command_path,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.command_path, ctx, ready).await;
    }

    /// Called when a user joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice_state::handle_voice_state_update(
            &self.channel_name,
            &self.locks,
            ctx,
            old,
            new,
        )
        .await;
    }

    /// Called when a user invokes a slash command or another interaction
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.commands, ctx, interaction).await;
    }
}
