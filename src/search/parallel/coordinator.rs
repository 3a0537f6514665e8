//! Search coordinator: partitions the space, runs workers and the monitor,
//! and turns the final shared state into a [`SearchReport`].

use crate::error::Result;
use crate::oracle::{Oracle, ProbeOutcome};
use crate::search::config::SearchConfig;
use crate::search::parallel::cancel::CancelToken;
use crate::search::parallel::monitor::{SnapshotSink, run_monitor};
use crate::search::parallel::state::SharedSearchState;
use crate::search::parallel::worker::run_worker;
use crate::search::result::{SearchOutcome, SearchReport, SearchStatistics, WorkerReport};
use crate::search::space::{SearchSpace, partition};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Run a full search over `space`.
///
/// Fails only on structural problems (zero workers). Once workers start,
/// the run always ends in `Found`, `Cancelled`, or `Exhausted`.
pub fn run_search<O, S>(
    space: SearchSpace,
    config: &SearchConfig,
    oracle: &O,
    cancel: &CancelToken,
    sink: &mut S,
) -> Result<SearchReport>
where
    O: Oracle + ?Sized,
    S: SnapshotSink + Send + ?Sized,
{
    let start_time = Instant::now();
    let partitions = partition(space, config.workers)?;

    if config.try_direct && !cancel.is_cancelled() {
        match oracle.probe_direct() {
            ProbeOutcome::Match => {
                info!("direct probe matched, skipping search");
                return Ok(SearchReport {
                    outcome: SearchOutcome::DirectSuccess,
                    statistics: SearchStatistics {
                        elapsed: start_time.elapsed(),
                        ..Default::default()
                    },
                });
            }
            ProbeOutcome::NoMatch => debug!("direct probe did not match"),
            ProbeOutcome::Error(message) => warn!(%message, "direct probe failed"),
        }
    }

    info!(
        start = space.start(),
        end = space.end(),
        workers = partitions.len(),
        "starting search"
    );

    let state = SharedSearchState::new();
    let notify_every = config.notify_every;
    let interval = config.progress_interval;

    let worker_reports = thread::scope(|s| {
        let state = &state;

        let worker_handles: Vec<_> = partitions
            .iter()
            .map(|&p| s.spawn(move || run_worker(p, state, cancel, oracle, notify_every)))
            .collect();

        let monitor_handle = s.spawn(move || run_monitor(space, state, cancel, sink, interval));

        let mut reports: Vec<WorkerReport> = Vec::with_capacity(worker_handles.len());
        for (worker_id, handle) in worker_handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => error!(worker_id, "worker panicked"),
            }
        }

        // Workers are done; only now may the monitor stop on its own.
        state.mark_complete();
        if monitor_handle.join().is_err() {
            error!("progress monitor panicked");
        }

        reports
    });

    let outcome = if let Some(value) = state.success_value() {
        SearchOutcome::Found(value)
    } else if state.stop_requested() || cancel.is_cancelled() {
        // The token may fire during a worker's final probe, after which no
        // worker looks at it again.
        SearchOutcome::Cancelled
    } else {
        SearchOutcome::Exhausted
    };

    let statistics = SearchStatistics {
        total_attempts: state.total_attempts(),
        elapsed: start_time.elapsed(),
        workers: partitions.len(),
        worker_reports,
    };

    info!(
        %outcome,
        attempts = statistics.total_attempts,
        elapsed = ?statistics.elapsed,
        "search finished"
    );

    Ok(SearchReport {
        outcome,
        statistics,
    })
}
