// src/timing.rs
// Self-calibrating gap thresholds

use crate::error::{MorseError, Result};
use crate::signal::Signal;

/// Minimum lengths, in blocks, of the three silence classes.
/// Always `element < letter < word`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub element: usize,
    pub letter: usize,
    pub word: usize,
}

/// Groups gap lengths into tiers. Morse gaps are nominally 1, 3 and 7 units
/// long, so each tier starts with a length more than twice the longest length
/// of the tier below. Returns the first length of every tier, ascending.
///
/// The list is seeded with zero (the empty gap before the first tone), which
/// makes the shortest observed gap the start of the first tier.
pub fn gap_tiers(lengths: &[usize]) -> Vec<usize> {
    let mut sorted: Vec<usize> = lengths.iter().copied().filter(|&len| len > 0).collect();
    sorted.push(0);
    sorted.sort_unstable();
    sorted.dedup();

    sorted
        .windows(2)
        .filter(|pair| pair[1] > pair[0] * 2)
        .map(|pair| pair[1])
        .collect()
}

/// Derives the element/letter/word thresholds from a signal whose leading
/// silence has already been trimmed.
pub fn calibrate(signal: &Signal) -> Result<Thresholds> {
    let gaps = signal.gap_lengths();
    log::debug!("Gap lengths: {:?}", gaps);

    let tiers = gap_tiers(&gaps);
    log::debug!("Gap tiers: {:?}", tiers);

    if let [element, letter, word, ..] = tiers[..] {
        return Ok(Thresholds {
            element,
            letter,
            word,
        });
    }
    Err(MorseError::Calibration { found: tiers })
}
