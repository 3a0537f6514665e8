//! Hardware parallelism discovery.

/// Suggested number of search workers for this machine.
///
/// This is the logical CPU count; the search itself applies the
/// [`MAX_WORKERS`](crate::search::MAX_WORKERS) cap.
pub fn suggested_worker_count() -> usize {
    num_cpus::get().max(1)
}
