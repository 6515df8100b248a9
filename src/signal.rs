// src/signal.rs
// Binary on/off signal, one symbol per detector block

use crate::error::MorseError;
use std::fmt;
use std::str::FromStr;

pub const TONE: char = '1';
pub const SILENCE: char = '0';

/// A maximal stretch of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub symbol: char,
    pub len: usize,
}

impl Run {
    pub fn is_gap(&self) -> bool {
        self.symbol == SILENCE
    }
}

/// Sequence of '0'/'1' symbols. Stored as text so that the segmenter can
/// split on runs of silence directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signal(String);

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tone: bool) {
        self.0.push(if tone { TONE } else { SILENCE });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Drops the silence recorded before the first tone.
    pub fn trim_leading_silence(&self) -> Signal {
        Signal(self.0.trim_start_matches(SILENCE).to_string())
    }

    /// Run-length decomposition, in order, including the final run.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for symbol in self.0.chars() {
            match runs.last_mut() {
                Some(run) if run.symbol == symbol => run.len += 1,
                _ => runs.push(Run { symbol, len: 1 }),
            }
        }
        runs
    }

    pub fn from_runs(runs: &[Run]) -> Signal {
        Signal(
            runs.iter()
                .map(|run| run.symbol.to_string().repeat(run.len))
                .collect(),
        )
    }

    /// Lengths of the silent runs that end in a tone. Silence after the last
    /// tone has no closing edge, so its length says nothing about timing.
    pub fn gap_lengths(&self) -> Vec<usize> {
        let mut runs = self.runs();
        if runs.last().is_some_and(Run::is_gap) {
            runs.pop();
        }
        runs.iter()
            .filter(|run| run.is_gap())
            .map(|run| run.len)
            .collect()
    }
}

impl FromStr for Signal {
    type Err = MorseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().find(|&c| c != TONE && c != SILENCE) {
            Some(bad) => Err(MorseError::InvalidSignal(bad)),
            None => Ok(Signal(s.to_string())),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
