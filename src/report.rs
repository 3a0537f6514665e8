//! Presentation of progress snapshots and final results.

use crate::search::{ProgressSnapshot, SearchOutcome, SearchReport, SnapshotSink};
use std::io::Write;
use tracing::info;

/// Repaints a single status line on a terminal-like writer.
pub struct ConsoleSink<W: Write> {
    out: W,
    width: usize,
    painted: bool,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout(width: usize) -> Self {
        Self::new(std::io::stdout(), width)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            painted: false,
        }
    }

    /// End the status line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.painted {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.painted = false;
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// One-line rendering of a snapshot, candidate zero-padded to `width`.
pub fn format_snapshot(snapshot: &ProgressSnapshot, width: usize) -> String {
    format!(
        "current {:0width$} | {:.2}% | {} attempts | {:.2}/s | {} workers | {}s",
        snapshot.current_probe,
        snapshot.progress_percent,
        snapshot.total_attempts,
        snapshot.attempts_per_second,
        snapshot.active_workers,
        snapshot.elapsed_seconds(),
        width = width
    )
}

impl<W: Write> SnapshotSink for ConsoleSink<W> {
    fn present(&mut self, snapshot: &ProgressSnapshot) {
        // Erase to end of line so a shorter line leaves no residue.
        let _ = write!(self.out, "\r{}\x1b[K", format_snapshot(snapshot, self.width));
        let _ = self.out.flush();
        self.painted = true;
    }
}

/// Emits each snapshot as a structured `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SnapshotSink for TracingSink {
    fn present(&mut self, snapshot: &ProgressSnapshot) {
        info!(
            current = snapshot.current_probe,
            progress = %format!("{:.2}%", snapshot.progress_percent),
            attempts = snapshot.total_attempts,
            rate = %format!("{:.2}/s", snapshot.attempts_per_second),
            active_workers = snapshot.active_workers,
            "progress"
        );
    }
}

/// Human-readable summary of a finished run.
pub fn format_summary(report: &SearchReport, width: usize) -> String {
    let stats = &report.statistics;
    let mut s = String::new();

    match report.outcome {
        SearchOutcome::Found(value) => {
            s.push_str(&format!("Match found: {:0width$}\n", value, width = width));
        }
        SearchOutcome::DirectSuccess => {
            s.push_str("Direct probe succeeded, no candidate required\n");
        }
        SearchOutcome::Cancelled => s.push_str("Search interrupted\n"),
        SearchOutcome::Exhausted => s.push_str("No matching candidate in range\n"),
    }

    s.push_str(&format!("Total attempts: {}\n", stats.total_attempts));
    s.push_str(&format!("Workers: {}\n", stats.workers));
    s.push_str(&format!("Elapsed: {:.2?}\n", stats.elapsed));
    s.push_str(&format!("Throughput: {:.2} attempts/s\n", stats.throughput()));

    let errors = stats.oracle_errors();
    if errors > 0 {
        s.push_str(&format!("Oracle errors: {}\n", errors));
    }

    s
}
