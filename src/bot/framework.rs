use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::event_handler;
use crate::services::schedule::poller;

pub async fn run(settings: Settings, pool: SqlitePool) -> Result<(), Error> {
    let data = Arc::new(Data::new(pool, settings.clone()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::config::config(),
                commands::pack::pack(),
                commands::question::question(),
                commands::suggest::suggest(),
                commands::suggest::suggestion(),
                commands::send_now::sendnow(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None, // Slash commands only
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Bot only registers slash commands; ignore stray prefixes
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                // Register commands per-guild when GUILD_ID is set (instant,
                // useful for development), globally otherwise.
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await
                        .map_err(Error::Serenity)?;
                        info!(
                            "Registered {} commands in guild {}",
                            framework.options().commands.len(),
                            guild_id
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await
                            .map_err(Error::Serenity)?;
                        info!(
                            "Registered {} commands globally (may take up to an hour to appear)",
                            framework.options().commands.len()
                        );
                    }
                }

                // Start the scheduling loop
                poller::spawn_question_poller(ctx.http.clone(), data.clone());
                info!("Started question poller");

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}
