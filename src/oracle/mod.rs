//! Oracles decide whether a single candidate satisfies the search goal.
//!
//! The search core only consumes [`ProbeOutcome`]s. An oracle may block for
//! as long as it likes; cancellation is only observed between probes.

mod command;

pub use command::{CODE_PLACEHOLDER, CommandOracle};

/// Result of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Match,
    NoMatch,
    /// The probe could not be carried out. Treated as `NoMatch` by workers.
    Error(String),
}

impl ProbeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Match)
    }
}

/// External yes/no test over candidates.
///
/// Shared by reference across all worker threads, so implementations must be
/// `Sync`.
pub trait Oracle: Sync {
    /// Test one candidate.
    fn probe(&self, candidate: u64) -> ProbeOutcome;

    /// Zero-argument shortcut tried once before the search starts.
    fn probe_direct(&self) -> ProbeOutcome {
        ProbeOutcome::NoMatch
    }
}

impl<F> Oracle for F
where
    F: Fn(u64) -> ProbeOutcome + Sync,
{
    fn probe(&self, candidate: u64) -> ProbeOutcome {
        self(candidate)
    }
}
