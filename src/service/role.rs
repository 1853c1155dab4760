use serenity::all::{GuildId, Permissions, Role, RoleId};

/// Whether a role is off limits for self-assignment.
///
/// A role is privileged when it is `@everyone` (its ID equals the guild ID), is managed
/// by an integration, grants `ADMINISTRATOR`, or is positioned at or above every role
/// the bot holds. A bot without roles therefore treats every role as privileged.
///
/// # Arguments
/// - `role` - Role the user asked for
/// - `guild_id` - Guild the role belongs to
/// - `bot_role_positions` - Positions of all roles held by the bot in that guild
pub fn is_privileged(role: &Role, guild_id: GuildId, bot_role_positions: &[u16]) -> bool {
    role.id == RoleId::new(guild_id.get())
        || role.managed
        || role.permissions.contains(Permissions::ADMINISTRATOR)
        || bot_role_positions
            .iter()
            .all(|position| *position <= role.position)
}
