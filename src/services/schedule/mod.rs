pub mod evaluator;
pub mod poller;

pub use evaluator::SchedulerState;
