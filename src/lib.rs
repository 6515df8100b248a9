// src/lib.rs
// Library interface for mrse

pub mod config;
pub mod decoder;
pub mod energy;
pub mod error;
pub mod generator;
pub mod morse;
pub mod segment;
pub mod signal;
pub mod source;
pub mod timing;
pub mod wav;

pub use config::DecoderConfig;
pub use decoder::{MorseDecoder, Transcript, decode_source};
pub use error::{MorseError, Result};
pub use generator::MorseGenerator;
pub use signal::Signal;
pub use source::{MemorySource, SampleSource};
pub use timing::Thresholds;
pub use wav::WavSource;

use std::path::Path;

/// Decodes a WAV file with the default settings.
pub fn decode_wav_file<P: AsRef<Path>>(path: P) -> Result<String> {
    decode_wav_file_with(path, &DecoderConfig::default())
}

pub fn decode_wav_file_with<P: AsRef<Path>>(path: P, config: &DecoderConfig) -> Result<String> {
    let mut source = WavSource::open(path)?;
    decode_source(&mut source, config)
}
