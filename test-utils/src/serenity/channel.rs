//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::{ChannelType, GuildChannel, Permissions};

/// Overwrite type code for roles in Discord's payloads.
const OVERWRITE_ROLE: u8 = 0;
/// Overwrite type code for members in Discord's payloads.
const OVERWRITE_MEMBER: u8 = 1;

/// Creates a test Serenity GuildChannel of the given type.
///
/// The channel is named after its ID (`channel-51`). Voice-only fields (bitrate,
/// user limit) are set for voice and stage channels.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild the channel belongs to
/// - `kind` - Channel type
/// - `position` - Position within the guild's channel list
/// - `parent_id` - Category ID, `None` for top-level channels
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    kind: ChannelType,
    position: u16,
    parent_id: Option<u64>,
) -> GuildChannel {
    let audio = matches!(kind, ChannelType::Voice | ChannelType::Stage);

    channel_from_json(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": u8::from(kind),
        "name": format!("channel-{}", channel_id),
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": [],
        "nsfw": false,
        "flags": 0,
        "bitrate": if audio { Some(64000) } else { None },
        "user_limit": if audio { Some(0) } else { None },
        "rtc_region": null,
    }))
}

/// Creates a test Serenity category channel.
///
/// # Arguments
/// - `channel_id` - Category ID
/// - `guild_id` - Guild the category belongs to
/// - `position` - Position within the guild's channel list
/// - `overwrites` - Permission overwrite payloads, see `member_overwrite`
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_category(
    channel_id: u64,
    guild_id: u64,
    position: u16,
    overwrites: Vec<serde_json::Value>,
) -> GuildChannel {
    channel_from_json(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": u8::from(ChannelType::Category),
        "name": format!("category-{}", channel_id),
        "position": position,
        "parent_id": null,
        "permission_overwrites": overwrites,
        "nsfw": false,
        "flags": 0,
    }))
}

/// Builds a permission overwrite payload for a guild member.
///
/// # Arguments
/// - `user_id` - Member the overwrite applies to
/// - `allow` - Explicitly allowed permissions; nothing is denied
pub fn member_overwrite(user_id: u64, allow: Permissions) -> serde_json::Value {
    overwrite(user_id, OVERWRITE_MEMBER, allow, Permissions::empty())
}

/// Builds a permission overwrite payload for a role.
pub fn role_overwrite(role_id: u64, allow: Permissions, deny: Permissions) -> serde_json::Value {
    overwrite(role_id, OVERWRITE_ROLE, allow, deny)
}

fn overwrite(id: u64, kind: u8, allow: Permissions, deny: Permissions) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "type": kind,
        "allow": allow.bits().to_string(),
        "deny": deny.bits().to_string(),
    })
}

fn channel_from_json(value: serde_json::Value) -> GuildChannel {
    serde_json::from_value(value).expect("Failed to create test channel - invalid JSON structure")
}
