use chrono::{DateTime, Utc};

/// History row recording that a question was delivered to a guild.
/// `send_count` grows past 1 once the pool is exhausted and the
/// least-sent fallback starts recycling questions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentQuestion {
    pub guild_id: i64,
    pub pack_id: i64,
    pub question_id: i64,
    pub send_count: i64,
    pub sent_at: DateTime<Utc>,
}
