use chrono::{DateTime, Utc};

/// Named, guild-scoped collection of questions
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Pack {
    pub pack_id: i64,
    pub guild_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
