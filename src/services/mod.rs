pub mod claim_runner;
pub mod scheduler;

pub use claim_runner::*;
pub use scheduler::*;
