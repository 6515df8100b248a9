// src/wav.rs
// Integer PCM WAV input

use crate::error::{MorseError, Result};
use crate::source::SampleSource;
use hound::{SampleFormat, WavReader, WavSpec};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct WavSource<R: Read> {
    reader: WavReader<R>,
    spec: WavSpec,
}

impl WavSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(WavReader::open(path)?)
    }
}

impl<R: Read> WavSource<R> {
    pub fn new(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int {
            return Err(MorseError::UnsupportedFormat(format!(
                "{:?} samples, only integer PCM is supported",
                spec.sample_format
            )));
        }
        if spec.channels == 0 {
            return Err(MorseError::UnsupportedFormat("no channels".to_string()));
        }
        Ok(Self { reader, spec })
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }
}

impl<R: Read> SampleSource for WavSource<R> {
    fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    fn bits_per_sample(&self) -> u16 {
        self.spec.bits_per_sample
    }

    fn frames(&self) -> u32 {
        self.reader.duration()
    }

    /// Multi-channel frames are averaged down to mono.
    fn read_frames(&mut self, n: usize) -> Result<Vec<i32>> {
        let channels = self.spec.channels as usize;
        let samples = self
            .reader
            .samples::<i32>()
            .take(n * channels)
            .collect::<std::result::Result<Vec<i32>, _>>()?;

        if channels == 1 {
            return Ok(samples);
        }
        Ok(samples
            .chunks_exact(channels)
            .map(|frame| (frame.iter().map(|&s| s as i64).sum::<i64>() / channels as i64) as i32)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavWriter;
    use std::io::Cursor;

    fn wav_bytes(spec: WavSpec, samples: &[i32]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn spec(channels: u16, bits: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn reads_mono_blocks() {
        let bytes = wav_bytes(spec(1, 16), &[1, -2, 3, -4, 5]);
        let mut source = WavSource::new(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();
        assert_eq!(source.sample_rate(), 8000);
        assert_eq!(source.bits_per_sample(), 16);
        assert_eq!(source.frames(), 5);
        assert_eq!(source.read_frames(3).unwrap(), vec![1, -2, 3]);
        assert_eq!(source.read_frames(3).unwrap(), vec![-4, 5]);
        assert!(source.read_frames(3).unwrap().is_empty());
    }

    #[test]
    fn downmixes_stereo() {
        let bytes = wav_bytes(spec(2, 16), &[100, 300, -50, -150, 7, 7]);
        let mut source = WavSource::new(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();
        assert_eq!(source.frames(), 3);
        assert_eq!(source.read_frames(10).unwrap(), vec![200, -100, 7]);
    }

    #[test]
    fn keeps_24_bit_range() {
        let bytes = wav_bytes(spec(1, 24), &[8_000_000, -8_000_000]);
        let mut source = WavSource::new(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();
        assert_eq!(source.bits_per_sample(), 24);
        assert_eq!(source.read_frames(2).unwrap(), vec![8_000_000, -8_000_000]);
    }

    #[test]
    fn rejects_float_samples() {
        let float_spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, float_spec).unwrap();
            writer.write_sample(0.5f32).unwrap();
            writer.finalize().unwrap();
        }
        let reader = WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
        assert!(matches!(
            WavSource::new(reader),
            Err(MorseError::UnsupportedFormat(_))
        ));
    }
}
