//! Parallel exhaustive search with cooperative cancellation.
//!
//! # Architecture
//!
//! - A **coordinator** partitions the space, spawns one worker per partition
//!   plus a progress monitor, joins them, and reports the outcome
//! - **Workers** probe their partition in ascending order
//! - A **monitor** samples the shared state and hands snapshots to a sink
//! - **Shared state** holds atomic counters plus a mutex/condvar pair for the
//!   probe position and the found/stop flags
//!
//! Workers never talk to each other; everything goes through
//! [`SharedSearchState`] and the [`CancelToken`].
//!
//! # Example
//!
//! ```ignore
//! use rangeprobe::search::{CancelToken, NullSink, SearchConfig, SearchSpace, run_search};
//!
//! let space = SearchSpace::new(0, 99)?;
//! let config = SearchConfig::default().with_workers(4);
//! let report = run_search(space, &config, &oracle, &CancelToken::new(), &mut NullSink)?;
//! ```

pub mod cancel;
pub mod coordinator;
pub mod monitor;
pub mod state;
pub mod worker;

pub use cancel::CancelToken;
pub use coordinator::run_search;
pub use monitor::{NullSink, ProgressSnapshot, SnapshotSink};
pub use state::SharedSearchState;
