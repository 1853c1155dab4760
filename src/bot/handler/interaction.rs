use dioxus_logger::tracing;
use serenity::all::{Context, Interaction};

use crate::service::command::CommandRegistry;

/// Handles an interaction by dispatching slash commands to the command registry.
///
/// Other interaction kinds (components, autocomplete, modals) are ignored.
pub async fn handle_interaction_create(
    commands: &CommandRegistry,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if let Err(e) = commands.handle(&ctx, &command).await {
        tracing::error!(
            "Failed to respond to command /{} of user {}: {}",
            command.data.name,
            command.user.id,
            e
        );
    }
}
