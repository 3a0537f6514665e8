//! Progress monitor: periodically samples shared state for presentation.
//!
//! The monitor is strictly a reader. It wakes on a bounded timeout or on a
//! worker's signal and stops as soon as the run is found, stopped,
//! cancelled, or marked complete.

use crate::search::parallel::cancel::CancelToken;
use crate::search::parallel::state::{SharedSearchState, StateView};
use crate::search::space::SearchSpace;
use std::time::{Duration, Instant};

/// Point-in-time progress summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Last candidate any worker began probing (display only).
    pub current_probe: u64,
    /// Position of `current_probe` within the space, in percent.
    pub progress_percent: f64,
    pub attempts_per_second: f64,
    pub total_attempts: u64,
    pub active_workers: usize,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    pub fn capture(space: &SearchSpace, view: &StateView, elapsed: Duration) -> Self {
        let offset = view.current_probe.saturating_sub(space.start());
        Self {
            current_probe: view.current_probe,
            progress_percent: offset as f64 / space.size() as f64 * 100.0,
            attempts_per_second: attempts_per_second(view.total_attempts, elapsed),
            total_attempts: view.total_attempts,
            active_workers: view.active_workers,
            elapsed,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Attempts per whole elapsed second, or 0 during the first second.
pub fn attempts_per_second(total_attempts: u64, elapsed: Duration) -> f64 {
    match elapsed.as_secs() {
        0 => 0.0,
        secs => total_attempts as f64 / secs as f64,
    }
}

/// Consumer of progress snapshots.
pub trait SnapshotSink {
    fn present(&mut self, snapshot: &ProgressSnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(&ProgressSnapshot),
{
    fn present(&mut self, snapshot: &ProgressSnapshot) {
        self(snapshot)
    }
}

/// Sink that discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn present(&mut self, _snapshot: &ProgressSnapshot) {}
}

/// Emit snapshots until the run ends. Returns the number emitted.
pub fn run_monitor<S: SnapshotSink + ?Sized>(
    space: SearchSpace,
    state: &SharedSearchState,
    cancel: &CancelToken,
    sink: &mut S,
    interval: Duration,
) -> usize {
    let started = Instant::now();
    let mut emitted = 0;

    while !cancel.is_cancelled() && state.is_running() {
        let snapshot = ProgressSnapshot::capture(&space, &state.view(), started.elapsed());
        sink.present(&snapshot);
        emitted += 1;

        if !state.wait_for_change(interval) {
            break;
        }
    }

    emitted
}
