use crate::bot::data::Context;
use crate::bot::error::Error;

/// Staff = Manage Server permission, or membership in the role named by
/// STAFF_ROLE_NAME.
pub async fn is_staff(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(member) = ctx.author_member().await else {
        return Ok(false);
    };

    if member
        .permissions(ctx.serenity_context())
        .map(|p| p.manage_guild())
        .unwrap_or(false)
    {
        return Ok(true);
    }

    let role_name = &ctx.data().settings.staff_role_name;
    if let Some(guild) = ctx.guild() {
        if let Some(role) = guild
            .roles
            .values()
            .find(|r| r.name.eq_ignore_ascii_case(role_name))
        {
            return Ok(member.roles.contains(&role.id));
        }
    }

    Ok(false)
}

/// Poise command check for staff-only commands; tells the user why when it
/// fails instead of failing silently.
pub async fn staff_check(ctx: Context<'_>) -> Result<bool, Error> {
    if is_staff(ctx).await? {
        return Ok(true);
    }

    ctx.send(
        poise::CreateReply::default()
            .content("You need Manage Server or the staff role to use this command.")
            .ephemeral(true),
    )
    .await?;

    Ok(false)
}
