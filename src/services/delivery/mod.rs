pub mod poster;
pub mod sender;

pub use poster::{post_question, PostOutcome};
pub use sender::DeliveryOutcome;
