use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::autocomplete_pack_name;
use crate::constants::embeds;
use crate::constants::schedule::MAX_QUESTION_LENGTH;
use crate::db::queries::{pack as pack_queries, question as question_queries};
use crate::utils::permissions::staff_check;

/// Manage questions in a pack
#[poise::command(
    slash_command,
    subcommands("add", "addbulk", "remove"),
    guild_only
)]
pub async fn question(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/question add`, `/question addbulk`, `/question remove`")
        .await?;
    Ok(())
}

/// Add a single question to a pack
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Pack to add the question to"]
    #[autocomplete = "autocomplete_pack_name"]
    pack: String,
    #[description = "The question text"] text: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let text = text.trim().to_string();
    if text.is_empty() || text.len() > MAX_QUESTION_LENGTH {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!(
                    "Questions must be 1-{} characters.",
                    MAX_QUESTION_LENGTH
                )))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &pack).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", pack)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let question = question_queries::add(
        pool,
        pack.pack_id,
        &text,
        Some(ctx.author().id.get() as i64),
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Question Added")
        .description(format!(
            "Added to **{}** as `#{}`.",
            pack.name, question.question_id
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Add several questions at once, one per line
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn addbulk(
    ctx: Context<'_>,
    #[description = "Pack to add the questions to"]
    #[autocomplete = "autocomplete_pack_name"]
    pack: String,
    #[description = "Questions, one per line"] questions: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &pack).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", pack)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let author_id = ctx.author().id.get() as i64;
    let mut added = 0usize;
    let mut skipped = 0usize;

    for line in questions.lines() {
        let line = line.trim();
        if line.is_empty() || line.len() > MAX_QUESTION_LENGTH {
            skipped += 1;
            continue;
        }
        question_queries::add(pool, pack.pack_id, line, Some(author_id)).await?;
        added += 1;
    }

    let mut description = format!(
        "Added {} question{} to **{}**.",
        added,
        if added == 1 { "" } else { "s" },
        pack.name
    );
    if skipped > 0 {
        description.push_str(&format!(" Skipped {} empty or oversized line(s).", skipped));
    }

    let embed = embeds::success_embed()
        .title("Questions Added")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Remove a question from a pack by its id (shown in /pack view)
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Pack the question belongs to"]
    #[autocomplete = "autocomplete_pack_name"]
    pack: String,
    #[description = "Question id, as shown by /pack view"] question_id: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let Some(pack) = pack_queries::get_by_name(pool, guild_id.get() as i64, &pack).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!("Pack **{}** not found.", pack)))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let removed = question_queries::remove(pool, pack.pack_id, question_id).await?;

    let reply = if removed {
        poise::CreateReply::default()
            .embed(
                embeds::success_embed()
                    .title("Question Removed")
                    .description(format!("Removed `#{}` from **{}**.", question_id, pack.name)),
            )
            .ephemeral(true)
    } else {
        poise::CreateReply::default()
            .embed(embeds::error_embed().description(format!(
                "No question `#{}` in **{}**.",
                question_id, pack.name
            )))
            .ephemeral(true)
    };

    ctx.send(reply).await?;

    Ok(())
}
