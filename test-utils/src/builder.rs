use serenity::all::{ChannelType, GuildChannel, VoiceState};

use crate::{
    context::TestContext,
    serenity::{create_test_category, create_test_channel, create_test_voice_state},
};

/// First user ID handed out for generated voice states.
const FIRST_USER_ID: u64 = 900_000_000_000_000_000;

/// Builder for creating guild test contexts.
///
/// Provides a fluent interface for laying out the categories and channels of a guild
/// and populating voice channels with connected users. Call `build()` to obtain the
/// resulting `TestContext`.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let guild = TestBuilder::new(1)
///     .with_category(50, 0, vec![])
///     .with_voice_channel(51, Some(50), 0, 3)
///     .with_voice_channel(52, Some(50), 1, 0)
///     .build();
/// ```
pub struct TestBuilder {
    guild_id: u64,
    channels: Vec<GuildChannel>,
    voice_states: Vec<VoiceState>,
    next_user_id: u64,
}

impl TestBuilder {
    /// Creates a new builder for a guild without channels.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID used for every generated object
    pub fn new(guild_id: u64) -> Self {
        Self {
            guild_id,
            channels: Vec::new(),
            voice_states: Vec::new(),
            next_user_id: FIRST_USER_ID,
        }
    }

    /// Adds a category channel.
    ///
    /// # Arguments
    /// - `channel_id` - Category ID
    /// - `position` - Category position
    /// - `overwrites` - Permission overwrites, see `member_overwrite` and `role_overwrite`
    pub fn with_category(
        mut self,
        channel_id: u64,
        position: u16,
        overwrites: Vec<serde_json::Value>,
    ) -> Self {
        self.channels.push(create_test_category(
            channel_id,
            self.guild_id,
            position,
            overwrites,
        ));
        self
    }

    /// Adds a channel of any type without connected users.
    pub fn with_channel(
        mut self,
        channel_id: u64,
        kind: ChannelType,
        parent_id: Option<u64>,
        position: u16,
    ) -> Self {
        self.channels.push(create_test_channel(
            channel_id,
            self.guild_id,
            kind,
            position,
            parent_id,
        ));
        self
    }

    /// Adds a voice channel with `occupants` connected users.
    ///
    /// Each occupant gets a fresh user ID and a voice state pointing at the channel.
    pub fn with_voice_channel(
        mut self,
        channel_id: u64,
        parent_id: Option<u64>,
        position: u16,
        occupants: usize,
    ) -> Self {
        self = self.with_channel(channel_id, ChannelType::Voice, parent_id, position);

        for _ in 0..occupants {
            self.voice_states.push(create_test_voice_state(
                self.guild_id,
                self.next_user_id,
                Some(channel_id),
            ));
            self.next_user_id += 1;
        }

        self
    }

    /// Finishes the guild layout.
    pub fn build(self) -> TestContext {
        TestContext {
            guild_id: self.guild_id,
            channels: self.channels,
            voice_states: self.voice_states,
        }
    }
}
