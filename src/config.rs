// src/config.rs
// Tunable constants of the decoder

use crate::error::{MorseError, Result};
use std::time::Duration;

/// RMS level, on the normalized 0-1 scale, above which a block counts as tone.
pub const RMS_THRESHOLD: f64 = 0.100;
/// Audio covered by one detector block.
pub const BLOCK_DURATION: Duration = Duration::from_millis(10);
/// Element tokens longer than this many blocks are dashes. This does not
/// follow the calibrated thresholds, so very fast or very slow sending can
/// confuse dots and dashes.
pub const DASH_MIN_BLOCKS: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    pub rms_threshold: f64,
    pub block_duration: Duration,
    pub dash_min_blocks: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            rms_threshold: RMS_THRESHOLD,
            block_duration: BLOCK_DURATION,
            dash_min_blocks: DASH_MIN_BLOCKS,
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.rms_threshold > 0.0 && self.rms_threshold < 1.0) {
            return Err(MorseError::InvalidConfig(format!(
                "RMS threshold must be in (0, 1), got {}",
                self.rms_threshold
            )));
        }
        if self.block_duration.is_zero() {
            return Err(MorseError::InvalidConfig(
                "block duration must be positive".to_string(),
            ));
        }
        if self.dash_min_blocks == 0 {
            return Err(MorseError::InvalidConfig(
                "dash length must be at least one block".to_string(),
            ));
        }
        Ok(())
    }
}
