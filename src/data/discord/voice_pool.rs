//! Discord-backed gateway for the dynamic voice pool.
//!
//! Channel lists and permission overwrites are fetched over HTTP on every read so a
//! pass never works from an outdated channel layout. Occupancy comes from the voice
//! states in serenity's cache: Discord has no REST endpoint listing voice states, and
//! the cache is updated from the gateway before the triggering event is dispatched.

use serenity::all::{
    Cache, ChannelId, ChannelType, CreateChannel, Guild, GuildChannel, GuildId,
    PermissionOverwriteType, Permissions, UserId, VoiceState,
};
use serenity::{async_trait, http::Http};
use std::{collections::HashMap, sync::Arc};

use crate::{
    error::AppError,
    model::channel::{CategorySnapshot, ChannelKind, PoolChannel},
    service::voice_pool::gateway::VoicePoolGateway,
};

pub struct DiscordVoicePoolGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordVoicePoolGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl VoicePoolGateway for DiscordVoicePoolGateway {
    async fn channel_category(
        &self,
        _guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<u64>, AppError> {
        let channel_id = ChannelId::new(channel_id);

        let cached = self.cache.channel(channel_id).map(|channel| channel.parent_id);
        let parent_id = match cached {
            Some(parent_id) => parent_id,
            None => self
                .http
                .get_channel(channel_id)
                .await?
                .guild()
                .and_then(|channel| channel.parent_id),
        };

        Ok(parent_id.map(|id| id.get()))
    }

    async fn get_category(
        &self,
        guild_id: u64,
        category_id: u64,
    ) -> Result<Option<CategorySnapshot>, AppError> {
        let guild_id = GuildId::new(guild_id);
        let category_id = ChannelId::new(category_id);

        let channels = self.http.get_channels(guild_id).await?;

        let Some(category) = channels
            .iter()
            .find(|channel| channel.id == category_id && channel.kind == ChannelType::Category)
        else {
            return Ok(None);
        };

        let bot_id = self.cache.current_user().id;
        let occupancy = guild_occupancy(self.cache.guild(guild_id).as_deref(), guild_id)?;

        Ok(Some(build_category_snapshot(
            category, &channels, &occupancy, bot_id,
        )))
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        category_id: u64,
        name: &str,
        position: u16,
        reason: &str,
    ) -> Result<PoolChannel, AppError> {
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Voice)
            .category(ChannelId::new(category_id))
            .position(position)
            .audit_log_reason(reason);

        let channel = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await?;

        Ok(PoolChannel {
            id: channel.id.get(),
            name: channel.name,
            kind: ChannelKind::Voice,
            position: channel.position,
            occupants: 0,
        })
    }

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .delete_channel(ChannelId::new(channel_id), Some(reason))
            .await?;

        Ok(())
    }
}

/// Occupancy of a cached guild.
///
/// Without the guild in the cache there are no voice states to count, and treating
/// every channel as empty would prune occupied channels. The pass is aborted instead.
///
/// # Returns
/// - `Ok(HashMap)` - Connected users per channel
/// - `Err(AppError::NotFound)` - The guild is not cached
pub fn guild_occupancy(
    guild: Option<&Guild>,
    guild_id: GuildId,
) -> Result<HashMap<ChannelId, usize>, AppError> {
    let guild = guild.ok_or_else(|| {
        AppError::NotFound(format!("Voice states of guild {} are not cached", guild_id))
    })?;

    Ok(count_occupants(guild.voice_states.values()))
}

/// Counts connected users per channel.
pub fn count_occupants<'a>(
    voice_states: impl Iterator<Item = &'a VoiceState>,
) -> HashMap<ChannelId, usize> {
    let mut occupancy = HashMap::new();
    for channel_id in voice_states.filter_map(|state| state.channel_id) {
        *occupancy.entry(channel_id).or_insert(0) += 1;
    }
    occupancy
}

/// Converts a category and the guild's channel list into a snapshot.
///
/// Only direct children of the category are included. The category counts as
/// manageable when the bot has a member overwrite on it that allows
/// `MANAGE_CHANNELS`; role overwrites and guild-wide permissions are deliberately not
/// resolved.
///
/// # Arguments
/// - `category` - The category channel
/// - `channels` - Every channel of the guild
/// - `occupancy` - Connected users per channel, see `count_occupants`
/// - `bot_id` - The bot's user ID
pub fn build_category_snapshot(
    category: &GuildChannel,
    channels: &[GuildChannel],
    occupancy: &HashMap<ChannelId, usize>,
    bot_id: UserId,
) -> CategorySnapshot {
    let manageable = category.permission_overwrites.iter().any(|overwrite| {
        matches!(overwrite.kind, PermissionOverwriteType::Member(user_id) if user_id == bot_id)
            && overwrite.allow.contains(Permissions::MANAGE_CHANNELS)
    });

    let channels = channels
        .iter()
        .filter(|channel| channel.parent_id == Some(category.id))
        .map(|channel| PoolChannel {
            id: channel.id.get(),
            name: channel.name.clone(),
            kind: ChannelKind::from_code(u8::from(channel.kind)),
            position: channel.position,
            occupants: occupancy.get(&channel.id).copied().unwrap_or(0),
        })
        .collect();

    CategorySnapshot {
        id: category.id.get(),
        guild_id: category.guild_id.get(),
        manageable,
        channels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        serenity::{member_overwrite, role_overwrite},
    };

    const BOT_ID: u64 = 7;

    fn snapshot(guild: &test_utils::context::TestContext, category_id: u64) -> CategorySnapshot {
        let category = guild.channel(category_id).expect("category exists");
        let occupancy = count_occupants(guild.voice_states.iter());
        build_category_snapshot(category, &guild.channels, &occupancy, UserId::new(BOT_ID))
    }

    /// Tests that the snapshot holds the category's children with their occupancy.
    ///
    /// Expected: channels of other categories and top-level channels are excluded,
    /// occupants counted per channel
    #[test]
    fn collects_children_with_occupancy() {
        let guild = TestBuilder::new(1)
            .with_category(50, 0, vec![member_overwrite(BOT_ID, Permissions::MANAGE_CHANNELS)])
            .with_category(60, 1, vec![])
            .with_channel(51, ChannelType::Text, Some(50), 0)
            .with_voice_channel(52, Some(50), 1, 3)
            .with_voice_channel(53, Some(50), 2, 0)
            .with_voice_channel(61, Some(60), 0, 1)
            .with_voice_channel(70, None, 5, 2)
            .build();

        let snapshot = snapshot(&guild, 50);

        assert_eq!(snapshot.id, 50);
        assert_eq!(snapshot.guild_id, 1);
        assert!(snapshot.manageable);

        let channels: Vec<(u64, ChannelKind, u16, usize)> = snapshot
            .channels
            .iter()
            .map(|c| (c.id, c.kind, c.position, c.occupants))
            .collect();
        assert_eq!(
            channels,
            vec![
                (51, ChannelKind::Text, 0, 0),
                (52, ChannelKind::Voice, 1, 3),
                (53, ChannelKind::Voice, 2, 0),
            ]
        );
    }

    /// Tests the manage permission check on the category's overwrites.
    ///
    /// Expected: only an allowing member overwrite for the bot grants management
    #[test]
    fn requires_member_overwrite_for_bot() {
        let guild = TestBuilder::new(1)
            .with_category(50, 0, vec![])
            .with_category(
                60,
                1,
                vec![member_overwrite(BOT_ID, Permissions::VIEW_CHANNEL)],
            )
            .with_category(
                70,
                2,
                vec![member_overwrite(8, Permissions::MANAGE_CHANNELS)],
            )
            .with_category(
                80,
                3,
                vec![role_overwrite(
                    BOT_ID,
                    Permissions::MANAGE_CHANNELS,
                    Permissions::empty(),
                )],
            )
            .with_category(
                90,
                4,
                vec![member_overwrite(
                    BOT_ID,
                    Permissions::MANAGE_CHANNELS | Permissions::VIEW_CHANNEL,
                )],
            )
            .build();

        assert!(!snapshot(&guild, 50).manageable);
        assert!(!snapshot(&guild, 60).manageable);
        assert!(!snapshot(&guild, 70).manageable);
        assert!(!snapshot(&guild, 80).manageable);
        assert!(snapshot(&guild, 90).manageable);
    }

    /// Tests occupancy of a guild missing from the cache.
    ///
    /// An occupied and an empty voice channel must not both look empty.
    ///
    /// Expected: Err(NotFound) instead of an empty occupancy map
    #[test]
    fn uncached_guild_has_no_occupancy() {
        let cache = Cache::new();
        let guild_id = GuildId::new(1);

        let result = guild_occupancy(cache.guild(guild_id).as_deref(), guild_id);

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    /// Tests occupancy counting, ignoring disconnected states.
    ///
    /// Expected: per-channel counts, no entry for users without a channel
    #[test]
    fn counts_connected_users_per_channel() {
        let states = vec![
            test_utils::serenity::create_test_voice_state(1, 10, Some(51)),
            test_utils::serenity::create_test_voice_state(1, 11, Some(51)),
            test_utils::serenity::create_test_voice_state(1, 12, Some(52)),
            test_utils::serenity::create_test_voice_state(1, 13, None),
        ];

        let occupancy = count_occupants(states.iter());

        assert_eq!(occupancy.len(), 2);
        assert_eq!(occupancy.get(&ChannelId::new(51)), Some(&2));
        assert_eq!(occupancy.get(&ChannelId::new(52)), Some(&1));
    }
}
