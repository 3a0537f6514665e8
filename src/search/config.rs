//! Configuration for a search run

use std::time::Duration;

/// Upper bound on worker threads, regardless of available parallelism.
pub const MAX_WORKERS: usize = 16;

/// Default interval between progress snapshots.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Default number of probes between explicit wake-ups of the monitor.
pub const DEFAULT_NOTIFY_EVERY: u64 = 1000;

/// Configuration for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Requested number of workers. Zero is rejected when the search starts;
    /// anything above `MAX_WORKERS` is capped.
    pub workers: usize,
    /// Upper bound on the monitor's wait between snapshots.
    pub progress_interval: Duration,
    /// Workers wake the monitor after this many probes.
    pub notify_every: u64,
    /// Try the zero-argument oracle probe before partitioning.
    pub try_direct: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: crate::parallelism::suggested_worker_count(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            notify_every: DEFAULT_NOTIFY_EVERY,
            try_direct: true,
        }
    }
}

impl SearchConfig {
    /// Set the requested number of workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the worker count from an Option, keeping the default on `None`.
    pub fn with_workers_option(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.workers = workers;
        }
        self
    }

    /// Set the maximum interval between progress snapshots.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set how many probes a worker runs between monitor wake-ups (at least 1).
    pub fn with_notify_every(mut self, probes: u64) -> Self {
        self.notify_every = probes.max(1);
        self
    }

    /// Enable or disable the zero-argument probe before partitioning.
    pub fn with_direct_probe(mut self, enabled: bool) -> Self {
        self.try_direct = enabled;
        self
    }
}
