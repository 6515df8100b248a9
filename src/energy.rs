// src/energy.rs
// Block RMS tone detector

use crate::error::{MorseError, Result};
use std::time::Duration;

/// Number of samples in one detector block, truncated toward zero.
pub fn block_size(sample_rate: u32, block_duration: Duration) -> Result<usize> {
    let size = (sample_rate as f64 * block_duration.as_secs_f64()) as usize;
    if size == 0 {
        return Err(MorseError::InvalidConfig(format!(
            "{} ms blocks are empty at {} Hz",
            block_duration.as_millis(),
            sample_rate
        )));
    }
    Ok(size)
}

/// Root-mean-square of `block`, with every sample scaled by half the
/// full-scale range of a `bits`-bit integer. The mean uses the number of
/// samples actually present, so a short final block is measured fairly.
pub fn rms(block: &[i32], bits: u16) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let scale = 1.0 / (2f64.powi(bits as i32) / 2.0);
    let sum_squares: f64 = block
        .iter()
        .map(|&s| {
            let n = s as f64 * scale;
            n * n
        })
        .sum();
    (sum_squares / block.len() as f64).sqrt()
}

/// Thresholds block loudness into tone ('1') or silence ('0').
#[derive(Debug, Clone, Copy)]
pub struct EnergyDetector {
    bits: u16,
    threshold: f64,
}

impl EnergyDetector {
    pub fn new(bits: u16, threshold: f64) -> Self {
        Self { bits, threshold }
    }

    pub fn is_tone(&self, block: &[i32]) -> bool {
        rms(block, self.bits) > self.threshold
    }

    pub fn classify(&self, block: &[i32]) -> char {
        if self.is_tone(block) { '1' } else { '0' }
    }
}
