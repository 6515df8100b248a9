// src/source.rs
// Where PCM samples come from

use crate::error::Result;

/// A mono stream of signed integer PCM samples read front to back.
pub trait SampleSource {
    fn sample_rate(&self) -> u32;

    /// Bits per sample; a sample's full-scale magnitude is `2^bits / 2`.
    fn bits_per_sample(&self) -> u16;

    /// Total number of frames in the recording.
    fn frames(&self) -> u32;

    /// Reads up to `n` frames. Returns fewer at the end of the recording.
    fn read_frames(&mut self, n: usize) -> Result<Vec<i32>>;
}

/// Samples already in memory, mostly for tests and synthesized audio.
#[derive(Debug, Clone)]
pub struct MemorySource {
    samples: Vec<i32>,
    sample_rate: u32,
    bits: u16,
    position: usize,
}

impl MemorySource {
    pub fn new(samples: Vec<i32>, sample_rate: u32, bits: u16) -> Self {
        Self {
            samples,
            sample_rate,
            bits,
            position: 0,
        }
    }

    pub fn from_i16(samples: &[i16], sample_rate: u32) -> Self {
        Self::new(samples.iter().map(|&s| s as i32).collect(), sample_rate, 16)
    }
}

/// Buffers longer than `u32::MAX` frames report `u32::MAX`.
fn frame_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl SampleSource for MemorySource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn bits_per_sample(&self) -> u16 {
        self.bits
    }

    fn frames(&self) -> u32 {
        frame_count(self.samples.len())
    }

    fn read_frames(&mut self, n: usize) -> Result<Vec<i32>> {
        let end = (self.position + n).min(self.samples.len());
        let block = self.samples[self.position..end].to_vec();
        self.position = end;
        Ok(block)
    }
}
