//! Oracle backed by an external program.

use super::{Oracle, ProbeOutcome};
use crate::error::{Result, SearchError};
use std::process::{Command, Output, Stdio};

/// Placeholder replaced by the zero-padded candidate in command arguments.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Runs `program args...` once per candidate and inspects its output.
///
/// Every argument containing [`CODE_PLACEHOLDER`] has it substituted with the
/// candidate, zero-padded to `width` digits. The direct probe runs the same
/// command with those arguments dropped.
///
/// A run matches when its combined stdout/stderr contains any of the success
/// markers. With no markers configured, a zero exit status is a match.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    width: usize,
    markers: Vec<String>,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(SearchError::Oracle("empty program name".to_string()));
        }
        Ok(Self {
            program,
            args,
            width: 0,
            markers: Vec::new(),
        })
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        self.markers = markers.into_iter().filter(|m| !m.is_empty()).collect();
        self
    }

    /// Zero-padded textual form of a candidate.
    pub fn format_code(&self, candidate: u64) -> String {
        format!("{:0width$}", candidate, width = self.width)
    }

    /// Arguments for probing `candidate`, or for the direct probe if `None`.
    pub fn arguments(&self, candidate: Option<u64>) -> Vec<String> {
        match candidate {
            Some(c) => {
                let code = self.format_code(c);
                self.args
                    .iter()
                    .map(|a| a.replace(CODE_PLACEHOLDER, &code))
                    .collect()
            }
            None => self
                .args
                .iter()
                .filter(|a| !a.contains(CODE_PLACEHOLDER))
                .cloned()
                .collect(),
        }
    }

    fn run(&self, args: Vec<String>) -> ProbeOutcome {
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => self.classify(&output),
            Err(e) => ProbeOutcome::Error(format!("failed to run {}: {}", self.program, e)),
        }
    }

    fn classify(&self, output: &Output) -> ProbeOutcome {
        if self.markers.is_empty() {
            return if output.status.success() {
                ProbeOutcome::Match
            } else {
                ProbeOutcome::NoMatch
            };
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let hit = self
            .markers
            .iter()
            .any(|m| stdout.contains(m.as_str()) || stderr.contains(m.as_str()));

        if hit {
            ProbeOutcome::Match
        } else {
            ProbeOutcome::NoMatch
        }
    }
}

impl Oracle for CommandOracle {
    fn probe(&self, candidate: u64) -> ProbeOutcome {
        self.run(self.arguments(Some(candidate)))
    }

    fn probe_direct(&self) -> ProbeOutcome {
        self.run(self.arguments(None))
    }
}
