use serenity::all::{Context, VoiceState};
use std::sync::Arc;

use crate::{
    data::discord::DiscordVoicePoolGateway,
    model::voice_state::VoiceStateEvent,
    service::voice_pool::{lock::CategoryLocks, VoicePoolService},
};

/// Handles a voice state update by reconciling the voice pools of the categories the
/// user left and joined.
///
/// # Arguments
/// - `channel_name` - Name for newly created pool channels
/// - `locks` - Category locks shared across events
/// - `ctx` - Discord context providing HTTP and cache access
/// - `old` - Previous voice state, if cached
/// - `new` - Current voice state
pub async fn handle_voice_state_update(
    channel_name: &str,
    locks: &CategoryLocks,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let event = VoiceStateEvent::from_states(old.as_ref(), &new);

    let gateway = Arc::new(DiscordVoicePoolGateway::new(ctx.http, ctx.cache));
    let service = VoicePoolService::new(gateway, channel_name, locks.clone());

    service.reconcile(event).await;
}
