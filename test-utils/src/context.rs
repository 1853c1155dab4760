use serenity::all::{ChannelId, GuildChannel, VoiceState};

/// Guild state produced by `TestBuilder`.
///
/// Mirrors what the bot reads from Discord for one guild: the channel list as returned
/// by `GET /guilds/{id}/channels` and the voice states kept by the gateway cache.
pub struct TestContext {
    /// Guild ID every channel and voice state belongs to.
    pub guild_id: u64,
    /// All channels of the guild, categories included, in insertion order.
    pub channels: Vec<GuildChannel>,
    /// One voice state per connected user.
    pub voice_states: Vec<VoiceState>,
}

impl TestContext {
    /// Looks up a channel by ID.
    ///
    /// # Returns
    /// - `Some(&GuildChannel)` - Channel with the given ID
    /// - `None` - No channel with that ID was added to the builder
    pub fn channel(&self, channel_id: u64) -> Option<&GuildChannel> {
        self.channels
            .iter()
            .find(|channel| channel.id == ChannelId::new(channel_id))
    }
}
