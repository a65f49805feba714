use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Question {
    pub question_id: i64,
    pub pack_id: i64,
    pub text: String,
    /// User who added the question, if known
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}
