//! rangeprobe - parallel exhaustive search against an external oracle
//!
//! Splits an inclusive `u64` range into contiguous partitions, probes each
//! partition on its own thread, reports live progress, and stops on the
//! first match or on cancellation.

pub mod error;
pub mod oracle;
pub mod parallelism;
pub mod report;
pub mod search;

pub use error::{Result, SearchError};
pub use oracle::{CommandOracle, Oracle, ProbeOutcome};
pub use search::{
    CancelToken, ProgressSnapshot, SearchConfig, SearchOutcome, SearchReport, SearchSpace,
    SnapshotSink, run_search,
};
