//! Search outcome and statistics

use crate::search::space::Partition;
use std::time::Duration;

/// Terminal state of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A worker's probe matched this candidate.
    Found(u64),
    /// The zero-argument probe matched; no workers were started.
    DirectSuccess,
    /// Stopped by the cancellation token before any match.
    Cancelled,
    /// Every candidate was probed without a match.
    Exhausted,
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Found(_) | SearchOutcome::DirectSuccess)
    }

    pub fn found_value(&self) -> Option<u64> {
        match self {
            SearchOutcome::Found(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Found(value) => write!(f, "found {}", value),
            SearchOutcome::DirectSuccess => write!(f, "direct success"),
            SearchOutcome::Cancelled => write!(f, "cancelled"),
            SearchOutcome::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Why a worker left its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Probed every candidate in its partition.
    Completed,
    /// Won the race to report a match.
    Matched,
    /// Another worker's match ended the run (including a lost race).
    Superseded,
    /// The cancellation token was signaled.
    Cancelled,
}

/// Per-worker accounting, returned when a worker exits.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub partition: Partition,
    /// Probes performed by this worker (errors included).
    pub attempts: u64,
    /// Probes whose oracle call reported an error.
    pub oracle_errors: u64,
    pub exit: ExitReason,
}

/// Aggregate statistics for a run.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Total oracle invocations across all workers (direct probe excluded).
    pub total_attempts: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Number of workers actually started.
    pub workers: usize,
    /// One report per worker, ordered by worker id.
    pub worker_reports: Vec<WorkerReport>,
}

impl SearchStatistics {
    /// Get probes per second over the whole run
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total_attempts as f64 / secs
        }
    }

    pub fn oracle_errors(&self) -> u64 {
        self.worker_reports.iter().map(|r| r.oracle_errors).sum()
    }
}

/// Result of [`run_search`](crate::search::run_search).
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub statistics: SearchStatistics,
}
