//! State shared by all workers and the progress monitor during one run.
//!
//! Simple counters are lock-free atomics. The probe position and the
//! found/stop flags live under a single mutex paired with a condition
//! variable, so "update state" and "wake waiters" happen together.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct ProbeState {
    current_probe: u64,
    success_value: Option<u64>,
    stop_requested: bool,
    run_complete: bool,
}

/// Point-in-time copy of the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateView {
    pub current_probe: u64,
    pub total_attempts: u64,
    pub active_workers: usize,
    pub found: bool,
    pub success_value: Option<u64>,
    pub stop_requested: bool,
}

#[derive(Debug, Default)]
pub struct SharedSearchState {
    total_attempts: AtomicU64,
    active_workers: AtomicUsize,
    /// Mirrors `success_value.is_some()` for lock-free polling. Only flipped
    /// while holding `inner`, after `success_value` is written.
    found: AtomicBool,
    inner: Mutex<ProbeState>,
    changed: Condvar,
}

impl SharedSearchState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        // Every critical section is a single assignment, so a poisoned guard
        // still holds consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the candidate a worker is about to probe.
    pub fn set_current_probe(&self, candidate: u64) {
        self.lock().current_probe = candidate;
    }

    pub fn current_probe(&self) -> u64 {
        self.lock().current_probe
    }

    pub fn record_attempt(&self) {
        self.total_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_attempts(&self) -> u64 {
        self.total_attempts.load(Ordering::Relaxed)
    }

    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Claim the match for `candidate`.
    ///
    /// Returns true only for the single caller that moves `found` from false
    /// to true; that caller's candidate becomes the success value and a stop
    /// is requested. Later callers leave the recorded value untouched.
    pub fn try_record_success(&self, candidate: u64) -> bool {
        let mut inner = self.lock();
        if self
            .found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        inner.success_value = Some(candidate);
        inner.stop_requested = true;
        drop(inner);
        self.changed.notify_all();
        true
    }

    pub fn success_value(&self) -> Option<u64> {
        self.lock().success_value
    }

    /// Request that everyone stop. Monotonic.
    pub fn request_stop(&self) {
        self.lock().stop_requested = true;
        self.changed.notify_all();
    }

    pub fn stop_requested(&self) -> bool {
        self.lock().stop_requested
    }

    /// Mark the run as over once all workers have been joined.
    pub fn mark_complete(&self) {
        self.lock().run_complete = true;
        self.changed.notify_all();
    }

    pub fn worker_started(&self) {
        self.active_workers.fetch_add(1, Ordering::SeqCst);
    }

    pub fn worker_exited(&self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
        self.notify();
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Wake everyone waiting on the state without changing it.
    pub fn notify(&self) {
        // Taking the lock orders the wake-up after any in-progress update.
        drop(self.lock());
        self.changed.notify_all();
    }

    /// Block for at most `timeout`, or until a worker signals.
    ///
    /// Returns false once the run is over (found, stop requested, or
    /// complete), checked both before and after waiting.
    pub fn wait_for_change(&self, timeout: Duration) -> bool {
        let inner = self.lock();
        if inner.stop_requested || inner.run_complete {
            return false;
        }
        let (inner, _) = self
            .changed
            .wait_timeout(inner, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        !(inner.stop_requested || inner.run_complete)
    }

    /// True while the monitor should keep reporting.
    pub fn is_running(&self) -> bool {
        let inner = self.lock();
        !(inner.stop_requested || inner.run_complete || self.is_found())
    }

    pub fn view(&self) -> StateView {
        let inner = self.lock();
        StateView {
            current_probe: inner.current_probe,
            total_attempts: self.total_attempts(),
            active_workers: self.active_workers(),
            found: self.is_found(),
            success_value: inner.success_value,
            stop_requested: inner.stop_requested,
        }
    }
}
