use chrono::{DateTime, Utc};

/// How often a guild receives a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Disabled,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub channel_id: Option<i64>,
    /// Where new suggestions are announced to staff
    pub notify_channel_id: Option<i64>,
    pub send_hour: Option<i64>,
    pub send_minute: Option<i64>,
    pub frequency: Frequency,
    /// 0 = Monday .. 6 = Sunday; only meaningful when frequency is weekly
    pub weekly_day: Option<i64>,
    pub ping_role_id: Option<i64>,
    pub active_pack_id: Option<i64>,
    pub last_question_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Configured send time as an (hour, minute) tuple
    pub fn send_time(&self) -> Option<(u32, u32)> {
        match (self.send_hour, self.send_minute) {
            (Some(h), Some(m)) => Some((h as u32, m as u32)),
            _ => None,
        }
    }

    /// Weekly send day, Monday-based. Weekly configs with no stored day
    /// default to Monday.
    pub fn weekday(&self) -> u32 {
        self.weekly_day.unwrap_or(0) as u32
    }

    /// Whether this config has everything the scheduler needs
    pub fn is_schedulable(&self) -> bool {
        self.frequency != Frequency::Disabled
            && self.channel_id.is_some()
            && self.send_time().is_some()
    }
}
