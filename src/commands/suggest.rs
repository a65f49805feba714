use serenity::all::{ChannelId, CreateMessage};
use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::autocomplete_pack_name;
use crate::constants::embeds;
use crate::constants::schedule::{MAX_QUESTION_LENGTH, SUGGESTIONS_PER_VIEW};
use crate::db::queries::suggestion::ReviewOutcome;
use crate::db::queries::{guild_config, pack as pack_queries, suggestion as suggestion_queries};
use crate::utils::formatting::{mention_user, truncate};
use crate::utils::permissions::staff_check;

/// Suggest a question for staff review
#[poise::command(slash_command, guild_only)]
pub async fn suggest(
    ctx: Context<'_>,
    #[description = "Pack the question should go in"]
    #[autocomplete = "autocomplete_pack_name"]
    pack: String,
    #[description = "Your question"] text: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let text = text.trim().to_string();
    if text.is_empty() || text.len() > MAX_QUESTION_LENGTH {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed().description(format!(
                    "Suggestions must be 1-{} characters.",
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
                .embed(embeds::error_embed().description(format!(
                    "Pack **{}** not found. `/pack list` shows the available packs.",
                    pack
                )))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let suggestion = suggestion_queries::create(
        pool,
        guild_id.get() as i64,
        pack.pack_id,
        ctx.author().id.get() as i64,
        &text,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Suggestion Submitted")
        .description(format!(
            "Thanks! Your suggestion is `#{}`, pending staff review for **{}**.",
            suggestion.suggestion_id, pack.name
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    // Announce in the configured notify channel, if any. Best effort.
    let config = guild_config::get(pool, guild_id.get() as i64).await?;
    if let Some(notify_id) = config.and_then(|c| c.notify_channel_id) {
        let announce = CreateMessage::new().embed(
            embeds::info_embed()
                .title(format!("New Suggestion #{}", suggestion.suggestion_id))
                .description(format!(
                    "{} suggested for **{}**:\n> {}",
                    mention_user(suggestion.user_id as u64),
                    pack.name,
                    truncate(&text, 500)
                )),
        );
        if let Err(e) = ChannelId::new(notify_id as u64)
            .send_message(ctx.serenity_context(), announce)
            .await
        {
            debug!("Could not announce suggestion in channel {}: {:?}", notify_id, e);
        }
    }

    Ok(())
}

/// Review member-submitted question suggestions
#[poise::command(
    slash_command,
    subcommands("list", "approve", "reject"),
    guild_only
)]
pub async fn suggestion(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/suggestion list`, `/suggestion approve`, `/suggestion reject`")
        .await?;
    Ok(())
}

/// List pending suggestions
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let pending = suggestion_queries::pending_for_guild(pool, guild_id.get() as i64).await?;

    if pending.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("No pending suggestions.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let mut lines = Vec::new();
    for s in pending.iter().take(SUGGESTIONS_PER_VIEW) {
        let pack_name = pack_queries::get_by_id(pool, s.pack_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| "unknown pack".to_string());
        lines.push(format!(
            "`#{}` by {} → **{}**\n> {}",
            s.suggestion_id,
            mention_user(s.user_id as u64),
            pack_name,
            truncate(&s.text, 150)
        ));
    }

    let mut description = lines.join("\n");
    if pending.len() > SUGGESTIONS_PER_VIEW {
        description.push_str(&format!(
            "\n… and {} more",
            pending.len() - SUGGESTIONS_PER_VIEW
        ));
    }

    let embed = embeds::standard_embed()
        .title(format!("Pending Suggestions ({})", pending.len()))
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Approve a suggestion, adding it to its pack
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn approve(
    ctx: Context<'_>,
    #[description = "Suggestion id, as shown by /suggestion list"] suggestion_id: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let outcome = suggestion_queries::approve(
        pool,
        guild_id.get() as i64,
        suggestion_id,
        ctx.author().id.get() as i64,
    )
    .await?;

    let reply = match outcome {
        ReviewOutcome::Approved(question) => {
            let pack_name = pack_queries::get_by_id(pool, question.pack_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_else(|| "its pack".to_string());
            poise::CreateReply::default().embed(
                embeds::success_embed()
                    .title("Suggestion Approved")
                    .description(format!(
                        "`#{}` added to **{}** as question `#{}`.",
                        suggestion_id, pack_name, question.question_id
                    )),
            )
        }
        ReviewOutcome::AlreadyProcessed(status) => poise::CreateReply::default().embed(
            embeds::warning_embed()
                .description(format!("Suggestion `#{}` was already {}.", suggestion_id, status)),
        ),
        ReviewOutcome::NotFound => poise::CreateReply::default().embed(
            embeds::error_embed()
                .description(format!("No suggestion `#{}` in this server.", suggestion_id)),
        ),
        ReviewOutcome::Rejected => unreachable!("approve never reports Rejected"),
    };

    ctx.send(reply.ephemeral(true)).await?;

    Ok(())
}

/// Reject a suggestion
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn reject(
    ctx: Context<'_>,
    #[description = "Suggestion id, as shown by /suggestion list"] suggestion_id: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let outcome = suggestion_queries::reject(
        &ctx.data().pool,
        guild_id.get() as i64,
        suggestion_id,
        ctx.author().id.get() as i64,
    )
    .await?;

    let reply = match outcome {
        ReviewOutcome::Rejected => poise::CreateReply::default().embed(
            embeds::success_embed()
                .title("Suggestion Rejected")
                .description(format!("Rejected suggestion `#{}`.", suggestion_id)),
        ),
        ReviewOutcome::AlreadyProcessed(status) => poise::CreateReply::default().embed(
            embeds::warning_embed()
                .description(format!("Suggestion `#{}` was already {}.", suggestion_id, status)),
        ),
        ReviewOutcome::NotFound => poise::CreateReply::default().embed(
            embeds::error_embed()
                .description(format!("No suggestion `#{}` in this server.", suggestion_id)),
        ),
        ReviewOutcome::Approved(_) => unreachable!("reject never reports Approved"),
    };

    ctx.send(reply.ephemeral(true)).await?;

    Ok(())
}
