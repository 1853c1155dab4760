//! Slash command handling.
//!
//! `registration` creates the commands described in the JSON descriptors on Discord.
//! `CommandRegistry` routes incoming command interactions to the `CommandHandler`
//! registered under the command's name and sends the handler's reply back as an
//! ephemeral message.

pub mod assign;
pub mod registration;

use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
};
use serenity::async_trait;
use std::{collections::HashMap, sync::Arc};

use crate::{error::AppError, model::locale::Reply};

/// Handler for one slash command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Name of the command this handler answers.
    fn name(&self) -> &str;

    /// Long running handlers get the interaction deferred before `handle` runs, so
    /// they are not bound by Discord's three second response window.
    fn is_long_running(&self) -> bool;

    async fn handle(&self, ctx: &Context, command: &CommandInteraction) -> Result<Reply, AppError>;
}

/// Routes command interactions to their handlers by command name.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its command name.
    ///
    /// # Returns
    /// - `true` - Handler registered
    /// - `false` - Another handler already owns the name; nothing changed
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) -> bool {
        let name = handler.name().to_string();

        if self.handlers.contains_key(&name) {
            tracing::warn!("Command handler for '{}' is already registered", name);
            return false;
        }

        tracing::info!("Registering command handler for '{}'", name);
        self.handlers.insert(name, handler);
        true
    }

    /// Removes the handler registered under `name`.
    ///
    /// # Returns
    /// - `true` - A handler was removed
    /// - `false` - No handler was registered under that name
    pub fn unregister(&mut self, name: &str) -> bool {
        tracing::info!("Unregistering command handler for '{}'", name);
        self.handlers.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Handles a command interaction and replies to it.
    ///
    /// Unknown commands and handler errors are answered with a localized
    /// "Something went wrong". The reply is always ephemeral.
    ///
    /// # Returns
    /// - `Ok(())` - Reply delivered
    /// - `Err(AppError)` - Deferring or replying to the interaction failed
    pub async fn handle(&self, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
        let handler = self.get(&command.data.name);
        let long_running = handler
            .as_ref()
            .is_some_and(|handler| handler.is_long_running());

        if long_running {
            command.defer_ephemeral(&ctx.http).await?;
        }

        let reply = match handler {
            Some(handler) => {
                tracing::info!(
                    "User {} executed command /{} in guild {:?}",
                    command.user.id,
                    command.data.name,
                    command.guild_id
                );

                handler.handle(ctx, command).await.unwrap_or_else(|e| {
                    tracing::error!("Command /{} failed: {}", command.data.name, e);
                    Reply::SomethingWentWrong
                })
            }
            None => {
                tracing::error!(
                    "No registered command handler for command /{}",
                    command.data.name
                );
                Reply::SomethingWentWrong
            }
        };

        let content = reply.render(&command.locale);

        if long_running {
            command
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content(content)
                        .ephemeral(true),
                )
                .await?;
        } else {
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content(content)
                            .ephemeral(true),
                    ),
                )
                .await?;
        }

        Ok(())
    }
}
