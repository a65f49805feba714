use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Member-submitted candidate question awaiting staff review
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Suggestion {
    pub suggestion_id: i64,
    pub guild_id: i64,
    /// Pack the question lands in if approved
    pub pack_id: i64,
    pub user_id: i64,
    pub text: String,
    pub status: SuggestionStatus,
    pub reviewer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
