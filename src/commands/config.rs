use poise::serenity_prelude::{Channel, Role};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::autocomplete_pack_name;
use crate::constants::embeds;
use crate::db::models::Frequency;
use crate::db::queries::{guild_config, pack as pack_queries};
use crate::utils::formatting::{mention_channel, mention_role};
use crate::utils::permissions::staff_check;
use crate::utils::time::{parse_hhmm, weekday_name};

/// Configure question delivery for this server
#[poise::command(
    slash_command,
    subcommands(
        "channel",
        "notify_channel",
        "time",
        "frequency",
        "pingrole",
        "set_pack",
        "view"
    ),
    guild_only
)]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/config channel`, `/config time`, `/config frequency`, `/config pack`, `/config view`").await?;
    Ok(())
}

/// Set the channel questions are delivered to
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn channel(
    ctx: Context<'_>,
    #[description = "Channel to send questions to"]
    #[channel_types("Text")]
    channel: Channel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_channel(
        &ctx.data().pool,
        guild_id.get() as i64,
        channel.id().get() as i64,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Channel Set")
        .description(format!(
            "Questions will be sent to {}",
            mention_channel(channel.id().get())
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the channel where new suggestions are announced to staff
#[poise::command(slash_command, rename = "notify-channel", guild_only, check = "staff_check")]
pub async fn notify_channel(
    ctx: Context<'_>,
    #[description = "Channel for suggestion announcements (omit to disable)"]
    #[channel_types("Text")]
    channel: Option<Channel>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let channel_id = channel.as_ref().map(|c| c.id().get() as i64);
    guild_config::set_notify_channel(&ctx.data().pool, guild_id.get() as i64, channel_id).await?;

    let description = match channel_id {
        Some(id) => format!(
            "New suggestions will be announced in {}",
            mention_channel(id as u64)
        ),
        None => "Suggestion announcements disabled".to_string(),
    };

    let embed = embeds::success_embed()
        .title("Notify Channel Set")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the delivery time (HH:MM, UTC)
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn time(
    ctx: Context<'_>,
    #[description = "Time in HH:MM format, UTC (e.g. 09:00)"] time: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let (hour, minute) = match parse_hhmm(&time) {
        Ok(t) => t,
        Err(e) => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(embeds::error_embed().description(e.to_string()))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    };

    guild_config::set_send_time(&ctx.data().pool, guild_id.get() as i64, hour, minute).await?;

    let embed = embeds::success_embed()
        .title("Send Time Set")
        .description(format!(
            "Questions will be sent at {:02}:{:02} UTC",
            hour, minute
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum FrequencyChoice {
    Daily,
    Weekly,
    Disabled,
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum WeekdayChoice {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayChoice {
    fn as_day(self) -> u32 {
        self as u32
    }
}

/// Set how often questions are sent
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn frequency(
    ctx: Context<'_>,
    #[description = "How often to send questions"] frequency: FrequencyChoice,
    #[description = "Day of the week, for weekly delivery"] day: Option<WeekdayChoice>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let (frequency, weekly_day) = match frequency {
        FrequencyChoice::Daily => (Frequency::Daily, None),
        FrequencyChoice::Disabled => (Frequency::Disabled, None),
        // Weekly defaults to Monday when no day is given
        FrequencyChoice::Weekly => (
            Frequency::Weekly,
            Some(day.map(WeekdayChoice::as_day).unwrap_or(0)),
        ),
    };

    guild_config::set_frequency(&ctx.data().pool, guild_id.get() as i64, frequency, weekly_day)
        .await?;

    let description = match (frequency, weekly_day) {
        (Frequency::Weekly, Some(d)) => {
            format!("Questions will be sent weekly on {}", weekday_name(d))
        }
        (f, _) => format!("Frequency set to {}", f),
    };

    let embed = embeds::success_embed()
        .title("Frequency Set")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set a role to ping with each question
#[poise::command(slash_command, guild_only, check = "staff_check")]
pub async fn pingrole(
    ctx: Context<'_>,
    #[description = "Role to ping (omit to remove)"] role: Option<Role>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let role_id = role.as_ref().map(|r| r.id.get() as i64);
    guild_config::set_ping_role(&ctx.data().pool, guild_id.get() as i64, role_id).await?;

    let description = match role_id {
        Some(id) => format!("Questions will ping {}", mention_role(id as u64)),
        None => "Ping role removed".to_string(),
    };

    let embed = embeds::success_embed()
        .title("Ping Role Set")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Select the active question pack
#[poise::command(slash_command, rename = "pack", guild_only, check = "staff_check")]
pub async fn set_pack(
    ctx: Context<'_>,
    #[description = "Name of the pack to use"]
    #[autocomplete = "autocomplete_pack_name"]
    name: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let Some(pack) = pack_queries::get_by_name(&ctx.data().pool, guild_id.get() as i64, &name).await?
    else {
        ctx.send(
            poise::CreateReply::default()
                .embed(
                    embeds::error_embed()
                        .description(format!("Pack **{}** not found. Create it with `/pack create`.", name)),
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    guild_config::set_active_pack(&ctx.data().pool, guild_id.get() as i64, Some(pack.pack_id))
        .await?;

    let embed = embeds::success_embed()
        .title("Active Pack Set")
        .description(format!("Questions will be drawn from **{}**", pack.name));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// View the current configuration
#[poise::command(slash_command, guild_only)]
pub async fn view(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let Some(config) = guild_config::get(&ctx.data().pool, guild_id.get() as i64).await? else {
        ctx.send(
            poise::CreateReply::default()
                .content("No configuration set for this server yet. Start with `/config channel`.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let channel = config
        .channel_id
        .map(|id| mention_channel(id as u64))
        .unwrap_or_else(|| "Not set".to_string());
    let notify = config
        .notify_channel_id
        .map(|id| mention_channel(id as u64))
        .unwrap_or_else(|| "Not set".to_string());
    let send_time = config
        .send_time()
        .map(|(h, m)| format!("{:02}:{:02} UTC", h, m))
        .unwrap_or_else(|| "Not set".to_string());
    let frequency = match config.frequency {
        Frequency::Weekly => format!("weekly on {}", weekday_name(config.weekday())),
        f => f.to_string(),
    };
    let ping_role = config
        .ping_role_id
        .map(|id| mention_role(id as u64))
        .unwrap_or_else(|| "Not set".to_string());

    let active_pack = match config.active_pack_id {
        Some(pack_id) => pack_queries::get_by_id(&ctx.data().pool, pack_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| "Not set".to_string()),
        None => "Not set".to_string(),
    };

    let embed = embeds::standard_embed()
        .title("QOTD Configuration")
        .field("Channel", channel, true)
        .field("Notify Channel", notify, true)
        .field("Send Time", send_time, true)
        .field("Frequency", frequency, true)
        .field("Ping Role", ping_role, true)
        .field("Active Pack", active_pack, true);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
