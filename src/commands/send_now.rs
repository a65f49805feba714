use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;
use crate::services::delivery::{post_question, PostOutcome};
use crate::utils::permissions::staff_check;

/// Send a question immediately, bypassing the schedule
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn sendnow(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let data = ctx.data();

    let Some(config) = guild_config::get(&data.pool, guild_id.get() as i64).await? else {
        ctx.send(
            poise::CreateReply::default()
                .embed(
                    embeds::error_embed()
                        .description("Nothing configured yet. Start with `/config channel`."),
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    if config.channel_id.is_none() {
        ctx.send(
            poise::CreateReply::default()
                .embed(
                    embeds::error_embed()
                        .description("No delivery channel set. Use `/config channel` first."),
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    // The delivery can take a moment (send lock + selection + transport)
    ctx.defer_ephemeral().await?;

    let outcome = post_question(&ctx.serenity_context().http, data, &config).await?;

    let reply = match outcome {
        PostOutcome::Sent(question) => poise::CreateReply::default().embed(
            embeds::success_embed()
                .title("Question Sent")
                .description(format!("Delivered question `#{}`.", question.question_id)),
        ),
        PostOutcome::NoActivePack => poise::CreateReply::default().embed(
            embeds::error_embed()
                .description("No active pack selected. Use `/config pack` first."),
        ),
        PostOutcome::PackMissing => poise::CreateReply::default().embed(
            embeds::error_embed()
                .description("The active pack no longer exists. Select a new one with `/config pack`."),
        ),
        PostOutcome::EmptyPack { pack_name } => poise::CreateReply::default().embed(
            embeds::warning_embed().description(format!(
                "The pack **{}** has no questions. Add some with `/question add`.",
                pack_name
            )),
        ),
        PostOutcome::NotDelivered => poise::CreateReply::default().embed(
            embeds::error_embed().description(
                "Could not deliver to the configured channel. Check the bot's permissions there.",
            ),
        ),
    };

    ctx.send(reply.ephemeral(true)).await?;

    Ok(())
}
