use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::autocomplete_pack_name;
use crate::constants::embeds;
use crate::constants::schedule::QUESTIONS_PER_VIEW;
use crate::db::queries::{guild_config, pack as pack_queries, question, sent_question};
use crate::utils::formatting::truncate;
use crate::utils::permissions::staff_check;

/// Manage question packs
#[poise::command(
    slash_command,
    subcommands("create", "delete", "list", "view", "reset"),
    guild_only
)]
pub async fn pack(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/pack create`, `/pack delete`, `/pack list`, `/pack view`, `/pack reset`").await?;
    Ok(())
}

/// Create a new question pack
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Name for the new pack"] name: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let name = name.trim().to_string();

    if name.is_empty() || name.len() > 100 {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description("Pack names must be 1-100 characters."))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    match pack_queries::create(&ctx.data().pool, guild_id.get() as i64, &name).await? {
        Some(pack) => {
            let embed = embeds::success_embed()
                .title("Pack Created")
                .description(format!(
                    "Created **{}**. Add questions with `/question add`, then select it with `/config pack`.",
                    pack.name
                ));
            ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        None => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(
                        embeds::error_embed()
                            .description(format!("A pack named **{}** already exists here.", name)),
                    )
                    .ephemeral(true),
            )
            .await?;
        }
    }

    Ok(())
}

/// Delete a pack, its questions, and its send history
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Name of the pack to delete"]
    #[autocomplete = "autocomplete_pack_name"]
    name: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &name).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", name)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    // Note before the delete clears it via the FK
    let was_active = guild_config::get(pool, guild_id.get() as i64)
        .await?
        .map(|c| c.active_pack_id == Some(pack.pack_id))
        .unwrap_or(false);

    pack_queries::delete(pool, pack.pack_id).await?;

    let mut description = format!("Deleted **{}** and all its questions.", pack.name);
    if was_active {
        description.push_str(" It was the active pack; select a new one with `/config pack`.");
    }

    let embed = embeds::success_embed()
        .title("Pack Deleted")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// List this server's packs
#[poise::command(slash_command, guild_only)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let packs = pack_queries::list_for_guild(pool, guild_id.get() as i64).await?;

    if packs.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("No packs yet. Create one with `/pack create`.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let mut lines = Vec::with_capacity(packs.len());
    for pack in &packs {
        let count = question::count_for_pack(pool, pack.pack_id).await?;
        lines.push(format!(
            "**{}** — {} question{}",
            pack.name,
            count,
            if count == 1 { "" } else { "s" }
        ));
    }

    let embed = embeds::standard_embed()
        .title("Question Packs")
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// View a pack's questions with their sent status
#[poise::command(slash_command, guild_only)]
pub async fn view(
    ctx: Context<'_>,
    #[description = "Name of the pack to view"]
    #[autocomplete = "autocomplete_pack_name"]
    name: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &name).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", name)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let questions = question::list_for_pack(pool, pack.pack_id).await?;
    if questions.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content(format!("Pack **{}** is empty.", pack.name))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let sent_ids: std::collections::HashSet<i64> =
        sent_question::history(pool, guild_id.get() as i64, pack.pack_id)
            .await?
            .into_iter()
            .map(|row| row.question_id)
            .collect();
    let sent_count = questions
        .iter()
        .filter(|q| sent_ids.contains(&q.question_id))
        .count();

    // Unsent first so staff can see what's still in rotation
    let mut ordered: Vec<_> = questions
        .iter()
        .filter(|q| !sent_ids.contains(&q.question_id))
        .chain(questions.iter().filter(|q| sent_ids.contains(&q.question_id)))
        .collect();
    ordered.truncate(QUESTIONS_PER_VIEW);

    let lines: Vec<String> = ordered
        .iter()
        .map(|q| {
            let marker = if sent_ids.contains(&q.question_id) {
                "✅"
            } else {
                "◻️"
            };
            format!("{} `#{}` {}", marker, q.question_id, truncate(&q.text, 80))
        })
        .collect();

    let mut description = lines.join("\n");
    if questions.len() > QUESTIONS_PER_VIEW {
        description.push_str(&format!(
            "\n… and {} more",
            questions.len() - QUESTIONS_PER_VIEW
        ));
    }

    let embed = embeds::standard_embed()
        .title(format!(
            "{} — {}/{} sent",
            pack.name,
            sent_count,
            questions.len()
        ))
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Clear this server's send history for a pack, restarting its rotation
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn reset(
    ctx: Context<'_>,
    #[description = "Name of the pack to reset"]
    #[autocomplete = "autocomplete_pack_name"]
    name: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &name).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", name)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let cleared = sent_question::reset(pool, guild_id.get() as i64, pack.pack_id).await?;

    let embed = embeds::success_embed()
        .title("Rotation Reset")
        .description(format!(
            "Cleared {} history entr{} for **{}**. Every question is unsent again.",
            cleared,
            if cleared == 1 { "y" } else { "ies" },
            pack.name
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
