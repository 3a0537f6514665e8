use rangeprobe::search::{ExitReason, NullSink, partition};
use rangeprobe::{
    CancelToken, Oracle, ProbeOutcome, ProgressSnapshot, SearchConfig, SearchOutcome, SearchSpace,
    run_search,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

fn config(workers: usize) -> SearchConfig {
    SearchConfig::default()
        .with_workers(workers)
        .with_progress_interval(Duration::from_millis(5))
        .with_direct_probe(false)
}

/// Oracle matching a fixed set of candidates and counting its invocations.
struct CountingOracle {
    matches: HashSet<u64>,
    calls: AtomicU64,
    probed: Mutex<Vec<u64>>,
}

impl CountingOracle {
    fn new(matches: &[u64]) -> Self {
        Self {
            matches: matches.iter().copied().collect(),
            calls: AtomicU64::new(0),
            probed: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Oracle for CountingOracle {
    fn probe(&self, candidate: u64) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probed.lock().unwrap().push(candidate);
        if self.matches.contains(&candidate) {
            ProbeOutcome::Match
        } else {
            ProbeOutcome::NoMatch
        }
    }
}

#[test]
fn test_single_match_found_for_every_worker_count() {
    let space = SearchSpace::new(0, 499).unwrap();
    for workers in 1..=16 {
        for target in [0, 1, 137, 250, 499] {
            let oracle = CountingOracle::new(&[target]);
            let report =
                run_search(space, &config(workers), &oracle, &CancelToken::new(), &mut NullSink)
                    .unwrap();

            assert_eq!(
                report.outcome,
                SearchOutcome::Found(target),
                "workers = {}, target = {}",
                workers,
                target
            );
            assert_eq!(report.statistics.total_attempts, oracle.calls());
        }
    }
}

#[test]
fn test_scenario_hundred_candidates_four_workers() {
    let space = SearchSpace::new(0, 99).unwrap();
    let bounds: Vec<_> = partition(space, 4)
        .unwrap()
        .iter()
        .map(|p| (p.start, p.end))
        .collect();
    assert_eq!(bounds, vec![(0, 24), (25, 49), (50, 74), (75, 99)]);

    let oracle = CountingOracle::new(&[42]);
    let report = run_search(space, &config(4), &oracle, &CancelToken::new(), &mut NullSink).unwrap();

    assert_eq!(report.outcome, SearchOutcome::Found(42));
    let attempts = report.statistics.total_attempts;
    assert!(attempts >= 18, "the matching partition probes 25..=42 at least");
    assert!(attempts <= 100);
    assert_eq!(attempts, oracle.calls());
}

#[test]
fn test_exhausted_covers_every_candidate_once() {
    let space = SearchSpace::new(1_000, 1_996).unwrap();
    for workers in [1, 3, 7, 16] {
        let oracle = CountingOracle::new(&[]);
        let report =
            run_search(space, &config(workers), &oracle, &CancelToken::new(), &mut NullSink)
                .unwrap();

        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert_eq!(report.statistics.total_attempts, space.size());

        let mut probed = oracle.probed.into_inner().unwrap();
        probed.sort_unstable();
        assert_eq!(probed, (1_000..=1_996).collect::<Vec<_>>());

        assert!(
            report
                .statistics
                .worker_reports
                .iter()
                .all(|r| r.exit == ExitReason::Completed)
        );
    }
}

#[test]
fn test_ten_candidates_one_worker_exhausted() {
    let space = SearchSpace::new(0, 9).unwrap();
    let oracle = |_: u64| ProbeOutcome::NoMatch;
    let report = run_search(space, &config(1), &oracle, &CancelToken::new(), &mut NullSink).unwrap();

    assert_eq!(report.outcome, SearchOutcome::Exhausted);
    assert_eq!(report.statistics.total_attempts, 10);
}

#[test]
fn test_multiple_matches_single_winner() {
    let space = SearchSpace::new(0, 999).unwrap();
    let matches = [10, 260, 510, 760];
    let oracle = CountingOracle::new(&matches);

    let report = run_search(space, &config(4), &oracle, &CancelToken::new(), &mut NullSink).unwrap();

    let value = report.outcome.found_value().expect("a match should be found");
    assert!(matches.contains(&value));
    let winners: Vec<_> = report
        .statistics
        .worker_reports
        .iter()
        .filter(|r| r.exit == ExitReason::Matched)
        .collect();
    assert_eq!(winners.len(), 1);
    assert!(winners[0].partition.start <= value && value <= winners[0].partition.end);
}

#[test]
fn test_errors_do_not_abort_run() {
    let space = SearchSpace::new(0, 199).unwrap();
    let oracle = |c: u64| match c {
        150 => ProbeOutcome::Match,
        c if c % 3 == 0 => ProbeOutcome::Error("transient failure".to_string()),
        _ => ProbeOutcome::NoMatch,
    };

    let report = run_search(space, &config(1), &oracle, &CancelToken::new(), &mut NullSink).unwrap();

    assert_eq!(report.outcome, SearchOutcome::Found(150));
    assert_eq!(report.statistics.total_attempts, 151);
    // 0, 3, ..., 147
    assert_eq!(report.statistics.oracle_errors(), 50);
}

#[test]
fn test_external_cancel_stops_promptly() {
    let space = SearchSpace::new(0, 10_000_000).unwrap();
    let cancel = CancelToken::new();
    let calls = AtomicU64::new(0);
    let oracle = |_: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_micros(200));
        ProbeOutcome::NoMatch
    };

    let report = std::thread::scope(|s| {
        let remote = cancel.clone();
        s.spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });
        run_search(space, &config(4), &oracle, &cancel, &mut NullSink).unwrap()
    });

    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    let attempts = report.statistics.total_attempts;
    assert!(attempts < space.size());
    assert_eq!(attempts, calls.load(Ordering::SeqCst));
    assert!(
        report
            .statistics
            .worker_reports
            .iter()
            .all(|r| r.exit == ExitReason::Cancelled)
    );
}

#[test]
fn test_progress_snapshots_are_monotonic() {
    let space = SearchSpace::new(0, 3_999).unwrap();
    let oracle = |_: u64| {
        std::thread::sleep(Duration::from_micros(50));
        ProbeOutcome::NoMatch
    };
    let mut snapshots: Vec<ProgressSnapshot> = Vec::new();
    let mut sink = |s: &ProgressSnapshot| snapshots.push(*s);

    let report = run_search(
        space,
        &config(2).with_notify_every(100),
        &oracle,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(report.outcome, SearchOutcome::Exhausted);
    assert!(!snapshots.is_empty());
    for pair in snapshots.windows(2) {
        assert!(pair[0].total_attempts <= pair[1].total_attempts);
        assert!(pair[0].elapsed <= pair[1].elapsed);
    }
    for snap in &snapshots {
        assert!(snap.total_attempts <= space.size());
        assert!(snap.active_workers <= 2);
        assert!(snap.progress_percent >= 0.0 && snap.progress_percent < 100.0);
        assert!(snap.attempts_per_second.is_finite());
    }
}

#[test]
fn test_direct_success_reported() {
    struct Unlocked;
    impl Oracle for Unlocked {
        fn probe(&self, _candidate: u64) -> ProbeOutcome {
            ProbeOutcome::NoMatch
        }
        fn probe_direct(&self) -> ProbeOutcome {
            ProbeOutcome::Match
        }
    }

    let space = SearchSpace::new(0, 9).unwrap();
    let report = run_search(
        space,
        &config(2).with_direct_probe(true),
        &Unlocked,
        &CancelToken::new(),
        &mut NullSink,
    )
    .unwrap();

    assert_eq!(report.outcome, SearchOutcome::DirectSuccess);
    assert!(report.outcome.is_success());
}
