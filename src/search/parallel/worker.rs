//! Worker loop: probe one partition in ascending order.

use crate::oracle::{Oracle, ProbeOutcome};
use crate::search::parallel::cancel::CancelToken;
use crate::search::parallel::state::SharedSearchState;
use crate::search::result::{ExitReason, WorkerReport};
use crate::search::space::Partition;
use tracing::{debug, info, trace, warn};

/// Keeps `active_workers` balanced even if the oracle panics.
struct ActiveGuard<'a>(&'a SharedSearchState);

impl<'a> ActiveGuard<'a> {
    fn enter(state: &'a SharedSearchState) -> Self {
        state.worker_started();
        Self(state)
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.worker_exited();
    }
}

/// Probe every candidate in `partition` until a match, cancellation, or
/// another worker's match.
///
/// Oracle errors count as attempts and are otherwise treated as no-match.
/// The monitor is woken every `notify_every` probes.
pub fn run_worker<O: Oracle + ?Sized>(
    partition: Partition,
    state: &SharedSearchState,
    cancel: &CancelToken,
    oracle: &O,
    notify_every: u64,
) -> WorkerReport {
    let _active = ActiveGuard::enter(state);
    let worker_id = partition.worker_id;
    let notify_every = notify_every.max(1);

    debug!(
        worker_id,
        start = partition.start,
        end = partition.end,
        "worker started"
    );

    let mut attempts = 0u64;
    let mut oracle_errors = 0u64;
    let mut exit = ExitReason::Completed;

    for candidate in partition.candidates() {
        if state.is_found() {
            exit = ExitReason::Superseded;
            break;
        }
        if cancel.is_cancelled() {
            state.request_stop();
            exit = ExitReason::Cancelled;
            break;
        }

        state.set_current_probe(candidate);
        let outcome = oracle.probe(candidate);
        state.record_attempt();
        attempts += 1;

        match outcome {
            ProbeOutcome::Match => {
                if state.try_record_success(candidate) {
                    cancel.cancel();
                    info!(worker_id, candidate, "match found");
                    exit = ExitReason::Matched;
                } else {
                    debug!(worker_id, candidate, "match after another worker won");
                    exit = ExitReason::Superseded;
                }
                break;
            }
            ProbeOutcome::NoMatch => {}
            ProbeOutcome::Error(message) => {
                oracle_errors += 1;
                if oracle_errors == 1 {
                    warn!(worker_id, candidate, %message, "oracle error, treating as no match");
                } else {
                    trace!(worker_id, candidate, %message, "oracle error");
                }
            }
        }

        if attempts % notify_every == 0 {
            state.notify();
        }
    }

    debug!(worker_id, attempts, oracle_errors, ?exit, "worker exiting");

    WorkerReport {
        worker_id,
        partition,
        attempts,
        oracle_errors,
        exit,
    }
}
