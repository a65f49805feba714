use std::time::Duration;

/// How often the scheduling loop wakes up to evaluate guild triggers.
/// One-minute cadence matches the minute resolution of configured send times.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Pause between deliveries to different guilds within one tick, to smooth
/// outbound message bursts when many guilds share a send time.
pub const INTER_GUILD_DELAY: Duration = Duration::from_millis(1000);

/// Maximum length of a stored question, in characters. Discord embed
/// descriptions cap at 4096; leave room for formatting.
pub const MAX_QUESTION_LENGTH: usize = 2000;

/// Questions shown per page in /pack view
pub const QUESTIONS_PER_VIEW: usize = 20;

/// Pending suggestions shown by /suggestion list
pub const SUGGESTIONS_PER_VIEW: usize = 10;
