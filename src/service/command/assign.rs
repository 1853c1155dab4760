//! `/assign` lets members give themselves an unprivileged role.

use dioxus_logger::tracing;
use serenity::all::{CommandInteraction, Context, GuildId, ResolvedValue, Role, RoleId};
use serenity::async_trait;

use crate::{
    error::AppError,
    model::locale::Reply,
    service::{command::CommandHandler, role::is_privileged},
};

const ASSIGN_REASON: &str = "Self-assigned with /assign";

pub struct AssignCommandHandler;

#[async_trait]
impl CommandHandler for AssignCommandHandler {
    fn name(&self) -> &str {
        "assign"
    }

    fn is_long_running(&self) -> bool {
        false
    }

    async fn handle(&self, ctx: &Context, command: &CommandInteraction) -> Result<Reply, AppError> {
        let guild_id = command
            .guild_id
            .ok_or_else(|| AppError::InternalError("/assign used outside of a guild".to_string()))?;

        let options = command.data.options();
        let role = match options.first().map(|option| &option.value) {
            Some(ResolvedValue::Role(role)) => *role,
            _ => {
                return Err(AppError::InternalError(
                    "Expected a role as first /assign option".to_string(),
                ))
            }
        };

        let member_roles = command
            .member
            .as_ref()
            .map(|member| member.roles.clone())
            .ok_or_else(|| AppError::NotFound(format!("Member {}", command.user.id)))?;

        let bot_role_positions = bot_role_positions(ctx, guild_id).await?;

        if let Err(reply) = check_assignable(role, guild_id, &bot_role_positions, &member_roles) {
            tracing::info!(
                "Refused to assign role {} to user {}: {:?}",
                role.id,
                command.user.id,
                reply
            );
            return Ok(reply);
        }

        ctx.http
            .add_member_role(guild_id, command.user.id, role.id, Some(ASSIGN_REASON))
            .await?;

        tracing::info!(
            "Assigned role {} ({}) to user {} in guild {}",
            role.name,
            role.id,
            command.user.id,
            guild_id
        );

        Ok(Reply::RoleAssigned(format!("<@&{}>", role.id)))
    }
}

/// Positions of the roles the bot holds in a guild.
async fn bot_role_positions(ctx: &Context, guild_id: GuildId) -> Result<Vec<u16>, AppError> {
    let bot_id = ctx.cache.current_user().id;

    let member = guild_id.member(ctx, bot_id).await?;
    let roles = guild_id.roles(&ctx.http).await?;

    Ok(member
        .roles
        .iter()
        .filter_map(|role_id| roles.get(role_id))
        .map(|role| role.position)
        .collect())
}

/// Checks whether a member may give themselves `role`.
///
/// # Returns
/// - `Ok(())` - The role may be added
/// - `Err(Reply)` - The reply explaining why it may not
fn check_assignable(
    role: &Role,
    guild_id: GuildId,
    bot_role_positions: &[u16],
    member_roles: &[RoleId],
) -> Result<(), Reply> {
    if is_privileged(role, guild_id, bot_role_positions) {
        return Err(Reply::RolePrivileged);
    }

    if member_roles.contains(&role.id) {
        return Err(Reply::RoleAlreadyAssigned);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::Permissions;
    use test_utils::serenity::create_test_role;

    const GUILD_ID: u64 = 1000;

    /// Tests an ordinary role the member does not hold yet.
    ///
    /// Expected: Ok
    #[test]
    fn allows_unprivileged_new_role() {
        let role = create_test_role(5, "News", 2, Permissions::empty());

        assert_eq!(
            check_assignable(&role, GuildId::new(GUILD_ID), &[4], &[RoleId::new(6)]),
            Ok(())
        );
    }

    /// Tests a role the member already holds.
    ///
    /// Expected: Err(RoleAlreadyAssigned)
    #[test]
    fn reports_already_assigned_role() {
        let role = create_test_role(5, "News", 2, Permissions::empty());

        assert_eq!(
            check_assignable(&role, GuildId::new(GUILD_ID), &[4], &[RoleId::new(5)]),
            Err(Reply::RoleAlreadyAssigned)
        );
    }

    /// Tests that privilege is checked before membership.
    ///
    /// Expected: Err(RolePrivileged) even though the member holds the role
    #[test]
    fn refuses_privileged_role() {
        let role = create_test_role(5, "Admin", 2, Permissions::ADMINISTRATOR);

        assert_eq!(
            check_assignable(&role, GuildId::new(GUILD_ID), &[4], &[RoleId::new(5)]),
            Err(Reply::RolePrivileged)
        );
    }
}
