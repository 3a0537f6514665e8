//! Error types for search setup.
//!
//! Only structural problems surface here. Failures inside a single probe are
//! folded into the worker loop and never escape a run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search space [{start}, {end}]: start must not exceed end")]
    InvalidSpace { start: u64, end: u64 },
    #[error("search space [{start}, {end}] has more candidates than fit in a u64")]
    SpaceTooLarge { start: u64, end: u64 },
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),
    #[error("oracle misconfigured: {0}")]
    Oracle(String),
    #[error("failed to register interrupt handler: {0}")]
    Interrupt(String),
}
