pub mod delivery;
pub mod rotation;
pub mod schedule;
