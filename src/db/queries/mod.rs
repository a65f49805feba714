pub mod guild_config;
pub mod pack;
pub mod question;
pub mod sent_question;
pub mod suggestion;
