use serenity::all::{ChannelId, Http};
use tracing::{info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::models::{GuildConfig, Question};
use crate::db::queries::pack;
use crate::services::delivery::sender::{self, DeliveryOutcome};
use crate::services::rotation::selector::{self, NextQuestion};

/// What came of a posting attempt for one guild
#[derive(Debug)]
pub enum PostOutcome {
    Sent(Question),
    /// Active pack has no questions; a notice went to the channel
    EmptyPack { pack_name: String },
    /// Config has no active pack selected
    NoActivePack,
    /// Config points at a pack that no longer exists
    PackMissing,
    /// Transport refused the message (already logged)
    NotDelivered,
}

/// Select, deliver, and record one question for a guild. Shared by the
/// scheduled poller and /sendnow. The guild's send lock is held across the
/// whole select-deliver-record sequence so concurrent attempts cannot
/// double-send or double-count.
pub async fn post_question(
    http: &Http,
    data: &Data,
    config: &GuildConfig,
) -> Result<PostOutcome, Error> {
    let lock = data.send_lock(config.guild_id);
    let _guard = lock.lock().await;

    let channel_id = ChannelId::new(config.channel_id.ok_or(Error::ChannelNotConfigured)? as u64);

    let Some(pack_id) = config.active_pack_id else {
        return Ok(PostOutcome::NoActivePack);
    };

    let Some(pack) = pack::get_by_id(&data.pool, pack_id).await? else {
        warn!(
            guild_id = config.guild_id,
            pack_id, "active pack no longer exists, skipping"
        );
        return Ok(PostOutcome::PackMissing);
    };

    let question = match selector::select_next(&data.pool, config.guild_id, pack_id).await? {
        NextQuestion::Fresh(q) | NextQuestion::Recycled(q) => q,
        NextQuestion::EmptyPack => {
            sender::send_notice(
                http,
                channel_id,
                format!(
                    "The pack **{}** has no questions yet. Staff can add some with `/question add`.",
                    pack.name
                ),
            )
            .await;
            return Ok(PostOutcome::EmptyPack { pack_name: pack.name });
        }
    };

    let message =
        sender::build_question_message(&question, &pack.name, config.frequency, config.ping_role_id);

    match sender::deliver(http, channel_id, message).await {
        DeliveryOutcome::Delivered => {
            // Mark sent only after the transport accepted the message
            selector::record_sent(&data.pool, config.guild_id, pack_id, question.question_id)
                .await?;
            info!(
                guild_id = config.guild_id,
                question_id = question.question_id,
                channel_id = channel_id.get(),
                "delivered question"
            );
            Ok(PostOutcome::Sent(question))
        }
        DeliveryOutcome::MissingAccess | DeliveryOutcome::Failed => Ok(PostOutcome::NotDelivered),
    }
}
