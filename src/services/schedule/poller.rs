use std::sync::Arc;

use chrono::Utc;
use serenity::all::Http;
use tokio::time::interval;
use tracing::{debug, error, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::schedule::{INTER_GUILD_DELAY, POLL_INTERVAL};
use crate::db::queries::guild_config;
use crate::services::delivery::{post_question, PostOutcome};
use crate::services::schedule::SchedulerState;

/// Start the scheduling loop: one task, waking every poll interval,
/// delivering to every guild whose configured time matches.
pub fn spawn_question_poller(http: Arc<Http>, data: Arc<Data>) {
    tokio::spawn(async move {
        let mut state = SchedulerState::new();
        let mut ticker = interval(POLL_INTERVAL);

        loop {
            ticker.tick().await;

            if let Err(e) = run_tick(&http, &data, &mut state).await {
                error!("Scheduler tick failed: {:?}", e);
            }
        }
    });
}

/// One pass over all schedulable guilds. A single guild's failure is
/// logged and never stops the rest of the tick.
async fn run_tick(http: &Http, data: &Arc<Data>, state: &mut SchedulerState) -> Result<(), Error> {
    let now = Utc::now();
    let configs = guild_config::get_schedulable(&data.pool).await?;

    for config in configs {
        if !state.should_fire(&config, now) {
            continue;
        }

        match post_question(http, data, &config).await {
            Ok(PostOutcome::Sent(_)) => {}
            Ok(PostOutcome::NoActivePack) => {
                debug!(guild_id = config.guild_id, "due but no active pack, skipping");
            }
            Ok(PostOutcome::EmptyPack { pack_name }) => {
                debug!(
                    guild_id = config.guild_id,
                    pack = %pack_name,
                    "due but active pack is empty"
                );
            }
            Ok(PostOutcome::PackMissing) | Ok(PostOutcome::NotDelivered) => {
                // Already logged where it was detected
            }
            Err(e) => {
                warn!(
                    guild_id = config.guild_id,
                    "scheduled delivery failed: {:?}", e
                );
            }
        }

        // Smooth out bursts when many guilds share a send time
        tokio::time::sleep(INTER_GUILD_DELAY).await;
    }

    Ok(())
}
