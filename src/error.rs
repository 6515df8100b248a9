// src/error.rs
// Error type shared by every stage of the decoding pipeline

use thiserror::Error;

/// Everything that can abort a decode. There is no partial-result recovery:
/// the first error ends the run.
#[derive(Error, Debug)]
pub enum MorseError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid signal symbol {0:?}, expected '0' or '1'")]
    InvalidSignal(char),

    /// Fewer than three gap-length tiers were found in the recording.
    #[error("Could not calibrate timing: need 3 gap tiers, found {} ({found:?})", .found.len())]
    Calibration { found: Vec<usize> },

    #[error("Unknown Morse token {0:?}")]
    UnknownToken(String),
}

pub type Result<T> = std::result::Result<T, MorseError>;
