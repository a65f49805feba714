use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, info};

use crate::bot::data::Data;
use crate::bot::error::Error;

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    _data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::GuildDelete { incomplete, .. } => {
            // Config and packs are kept in case the bot is re-invited
            debug!("Guild {} removed", incomplete.id);
        }

        _ => {}
    }

    Ok(())
}
