mod guild_config;
mod pack;
mod question;
mod sent_question;
mod suggestion;

pub use guild_config::{Frequency, GuildConfig};
pub use pack::Pack;
pub use question::Question;
pub use sent_question::SentQuestion;
pub use suggestion::{Suggestion, SuggestionStatus};
