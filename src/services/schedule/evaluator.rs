use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::db::models::{Frequency, GuildConfig};

/// Whether a guild's configured schedule matches this instant, at minute
/// resolution. Weekdays are Monday-based (Monday = 0), matching how the
/// weekly day is stored.
pub fn is_due(config: &GuildConfig, now_utc: DateTime<Utc>) -> bool {
    let Some((hour, minute)) = config.send_time() else {
        return false;
    };

    if (now_utc.hour(), now_utc.minute()) != (hour, minute) {
        return false;
    }

    match config.frequency {
        Frequency::Disabled => false,
        Frequency::Daily => true,
        Frequency::Weekly => now_utc.weekday().num_days_from_monday() == config.weekday(),
    }
}

/// (year, month, day, hour, minute) key for duplicate-fire suppression
type MinuteKey = (i32, u32, u32, u32, u32);

fn minute_key(now: DateTime<Utc>) -> MinuteKey {
    (now.year(), now.month(), now.day(), now.hour(), now.minute())
}

/// Tracks the last minute each guild fired so that two polling ticks landing
/// in the same minute deliver at most once. Owned by the poller task; there
/// is no global scheduler state.
#[derive(Debug, Default)]
pub struct SchedulerState {
    last_fired: HashMap<i64, MinuteKey>,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per guild per due minute
    pub fn should_fire(&mut self, config: &GuildConfig, now_utc: DateTime<Utc>) -> bool {
        if !is_due(config, now_utc) {
            return false;
        }

        let key = minute_key(now_utc);
        if self.last_fired.get(&config.guild_id) == Some(&key) {
            return false;
        }

        self.last_fired.insert(config.guild_id, key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config_at(hour: i64, minute: i64, frequency: Frequency, weekly_day: Option<i64>) -> GuildConfig {
        GuildConfig {
            guild_id: 1,
            channel_id: Some(555),
            notify_channel_id: None,
            send_hour: Some(hour),
            send_minute: Some(minute),
            frequency,
            weekly_day,
            ping_role_id: None,
            active_pack_id: Some(10),
            last_question_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn daily_matches_only_the_configured_minute() {
        let config = config_at(9, 0, Frequency::Daily, None);

        assert!(is_due(&config, at(2024, 1, 1, 9, 0, 0)));
        assert!(is_due(&config, at(2024, 1, 1, 9, 0, 59)));
        assert!(!is_due(&config, at(2024, 1, 1, 8, 59, 0)));
        assert!(!is_due(&config, at(2024, 1, 1, 9, 1, 0)));
    }

    #[test]
    fn weekly_additionally_requires_the_weekday() {
        // Day 2 = Wednesday; 2024-01-03 was a Wednesday
        let config = config_at(9, 0, Frequency::Weekly, Some(2));

        assert!(is_due(&config, at(2024, 1, 3, 9, 0, 0)));
        for day in [1, 2, 4, 5, 6, 7] {
            assert!(!is_due(&config, at(2024, 1, day, 9, 0, 0)), "day {}", day);
        }
    }

    #[test]
    fn weekly_without_stored_day_defaults_to_monday() {
        let config = config_at(9, 0, Frequency::Weekly, None);

        // 2024-01-01 was a Monday
        assert!(is_due(&config, at(2024, 1, 1, 9, 0, 0)));
        assert!(!is_due(&config, at(2024, 1, 2, 9, 0, 0)));
    }

    #[test]
    fn disabled_is_never_due() {
        let config = config_at(9, 0, Frequency::Disabled, None);
        assert!(!is_due(&config, at(2024, 1, 1, 9, 0, 0)));
    }

    #[test]
    fn missing_send_time_is_never_due() {
        let mut config = config_at(9, 0, Frequency::Daily, None);
        config.send_minute = None;
        assert!(!is_due(&config, at(2024, 1, 1, 9, 0, 0)));
    }

    #[test]
    fn two_ticks_in_one_minute_fire_once() {
        let config = config_at(9, 0, Frequency::Daily, None);
        let mut state = SchedulerState::new();

        assert!(state.should_fire(&config, at(2024, 1, 1, 9, 0, 2)));
        // Jittered second tick lands in the same minute
        assert!(!state.should_fire(&config, at(2024, 1, 1, 9, 0, 58)));
        // Next day fires again
        assert!(state.should_fire(&config, at(2024, 1, 2, 9, 0, 0)));
    }

    #[test]
    fn guilds_are_tracked_independently() {
        let config_a = config_at(9, 0, Frequency::Daily, None);
        let mut config_b = config_at(9, 0, Frequency::Daily, None);
        config_b.guild_id = 2;

        let mut state = SchedulerState::new();
        let now = at(2024, 1, 1, 9, 0, 0);

        assert!(state.should_fire(&config_a, now));
        assert!(state.should_fire(&config_b, now));
        assert!(!state.should_fire(&config_a, now));
    }
}
