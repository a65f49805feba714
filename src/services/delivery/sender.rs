use serenity::all::{ChannelId, CreateEmbedFooter, CreateMessage, Http};
use serenity::http::HttpError;
use serenity::Error as SerenityError;
use tracing::{debug, warn};

use crate::constants::embeds;
use crate::db::models::{Frequency, Question};
use crate::utils::formatting::mention_role;

/// How the transport responded to a send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Bot lacks permission to post in the channel
    MissingAccess,
    /// Any other transport error; logged and skipped, never retried
    Failed,
}

/// Build the question message: optional role ping, question embed with a
/// pack attribution footer.
pub fn build_question_message(
    question: &Question,
    pack_name: &str,
    frequency: Frequency,
    ping_role_id: Option<i64>,
) -> CreateMessage {
    let title = match frequency {
        Frequency::Weekly => "❓ Question of the Week!",
        _ => "❓ Question of the Day!",
    };

    let embed = embeds::standard_embed()
        .title(title)
        .description(question.text.clone())
        .footer(CreateEmbedFooter::new(format!("From pack: {}", pack_name)));

    let mut message = CreateMessage::new().embed(embed);
    if let Some(role_id) = ping_role_id {
        message = message.content(mention_role(role_id as u64));
    }

    message
}

/// Send a message to a channel, classifying the result. Failures are
/// terminal for this attempt; the scheduler moves on.
pub async fn deliver(http: &Http, channel_id: ChannelId, message: CreateMessage) -> DeliveryOutcome {
    match channel_id.send_message(http, message).await {
        Ok(_) => DeliveryOutcome::Delivered,
        Err(SerenityError::Http(HttpError::UnsuccessfulRequest(resp)))
            if resp.status_code.as_u16() == 403 =>
        {
            warn!("Missing permission to send in channel {}", channel_id);
            DeliveryOutcome::MissingAccess
        }
        Err(e) => {
            warn!("Failed to send to channel {}: {:?}", channel_id, e);
            DeliveryOutcome::Failed
        }
    }
}

/// Best-effort plain notice to a channel (pool-state warnings and the like)
pub async fn send_notice(http: &Http, channel_id: ChannelId, text: impl Into<String>) {
    let message = CreateMessage::new().embed(embeds::warning_embed().description(text.into()));
    if let Err(e) = channel_id.send_message(http, message).await {
        debug!("Could not send notice to channel {}: {:?}", channel_id, e);
    }
}
