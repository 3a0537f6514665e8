//! Exhaustive search over a contiguous integer range
//!
//! - `space`: the candidate range and its split into per-worker partitions
//! - `config`: run configuration
//! - `parallel`: the concurrent worker/monitor machinery
//! - `result`: terminal outcomes and statistics

pub mod config;
pub mod parallel;
pub mod result;
pub mod space;

pub use config::{MAX_WORKERS, SearchConfig};
pub use parallel::{CancelToken, NullSink, ProgressSnapshot, SnapshotSink, run_search};
pub use result::{ExitReason, SearchOutcome, SearchReport, SearchStatistics, WorkerReport};
pub use space::{Partition, SearchSpace, partition};
