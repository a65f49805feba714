pub mod embeds;
pub mod schedule;
