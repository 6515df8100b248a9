// src/decoder.rs
// Block detector -> timing calibration -> segmentation

use crate::config::DecoderConfig;
use crate::energy::{EnergyDetector, block_size};
use crate::error::Result;
use crate::segment::Segmenter;
use crate::signal::Signal;
use crate::source::SampleSource;
use crate::timing::{Thresholds, calibrate};

// --- Main Decoder ---
pub struct MorseDecoder {
    detector: EnergyDetector,
    block_size: usize,
    dash_min_blocks: usize,
    signal: Signal,
}

impl MorseDecoder {
    pub fn new(sample_rate: u32, bits_per_sample: u16, config: &DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: EnergyDetector::new(bits_per_sample, config.rms_threshold),
            block_size: block_size(sample_rate, config.block_duration)?,
            dash_min_blocks: config.dash_min_blocks,
            signal: Signal::new(),
        })
    }

    /// Samples per detector block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The binary signal recorded so far, one symbol per processed block.
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// Classifies one block of samples and appends the result to the signal.
    pub fn process(&mut self, block: &[i32]) {
        self.signal.push(self.detector.is_tone(block));
    }

    /// Reads the whole source, one block at a time.
    pub fn process_source<S: SampleSource>(&mut self, source: &mut S) -> Result<()> {
        let frames = source.frames() as usize;
        for _ in (0..frames).step_by(self.block_size) {
            let block = source.read_frames(self.block_size)?;
            self.process(&block);
        }
        log::debug!("Processed {} blocks of {} samples", self.signal.len(), self.block_size);
        Ok(())
    }

    /// Calibrates timing on everything processed so far.
    pub fn finalize(self) -> Result<Transcript> {
        let signal = self.signal.trim_leading_silence();
        log::trace!("Signal: {}", signal);

        let thresholds = calibrate(&signal)?;
        log::info!(
            "Gap thresholds (blocks): element = {}, letter = {}, word = {}",
            thresholds.element,
            thresholds.letter,
            thresholds.word
        );

        Ok(Transcript {
            segmenter: Segmenter::new(thresholds, self.dash_min_blocks),
            signal,
            thresholds,
        })
    }
}

/// A calibrated signal, ready to be read out as text.
pub struct Transcript {
    signal: Signal,
    thresholds: Thresholds,
    segmenter: Segmenter,
}

impl Transcript {
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// Decoded words in order. The first error ends the decode.
    pub fn words(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.segmenter.words(&self.signal)
    }

    /// The whole text, each word followed by a single space.
    pub fn text(&self) -> Result<String> {
        self.segmenter.decode(&self.signal)
    }
}

/// Decodes everything `source` yields.
pub fn decode_source<S: SampleSource>(source: &mut S, config: &DecoderConfig) -> Result<String> {
    let mut decoder = MorseDecoder::new(source.sample_rate(), source.bits_per_sample(), config)?;
    decoder.process_source(source)?;
    decoder.finalize()?.text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MorseError;
    use crate::source::MemorySource;

    const RATE: u32 = 1000; // 10 samples per block
    const LOUD: i32 = 16000;

    /// One block per symbol, tone blocks as a loud square wave.
    fn samples_for(pattern: &str) -> Vec<i32> {
        pattern
            .chars()
            .flat_map(|c| {
                let level = if c == '1' { LOUD } else { 0 };
                (0..10).map(move |i| if i % 2 == 0 { level } else { -level })
            })
            .collect()
    }

    fn sos_sos() -> String {
        let dot = "111";
        let dash = "1".repeat(12);
        let s = format!("{dot}0{dot}0{dot}");
        let o = format!("{dash}0{dash}0{dash}");
        let word = format!("{s}000{o}000{s}");
        format!("{word}0000000{word}")
    }

    #[test]
    fn block_size_follows_sample_rate() {
        let config = DecoderConfig::default();
        assert_eq!(MorseDecoder::new(44100, 16, &config).unwrap().block_size(), 441);
        assert_eq!(MorseDecoder::new(RATE, 16, &config).unwrap().block_size(), 10);
    }

    #[test]
    fn records_one_symbol_per_block() {
        let mut decoder = MorseDecoder::new(RATE, 16, &DecoderConfig::default()).unwrap();
        let mut samples = samples_for("0110");
        samples.truncate(35); // short final block of 5 samples
        let mut source = MemorySource::new(samples, RATE, 16);
        decoder.process_source(&mut source).unwrap();
        assert_eq!(decoder.signal().as_str(), "0110");
    }

    #[test]
    fn decodes_in_memory_audio() {
        let pattern = format!("0000000000{}", sos_sos());
        let mut source = MemorySource::new(samples_for(&pattern), RATE, 16);
        let text = decode_source(&mut source, &DecoderConfig::default()).unwrap();
        assert_eq!(text, "SOS SOS ");
    }

    #[test]
    fn finalize_trims_leading_silence() {
        let mut decoder = MorseDecoder::new(RATE, 16, &DecoderConfig::default()).unwrap();
        let mut source = MemorySource::new(samples_for(&format!("00000{}", sos_sos())), RATE, 16);
        decoder.process_source(&mut source).unwrap();
        let transcript = decoder.finalize().unwrap();
        assert!(transcript.signal().as_str().starts_with('1'));
        assert_eq!(
            transcript.thresholds(),
            Thresholds {
                element: 1,
                letter: 3,
                word: 7
            }
        );
        let words: Vec<String> = transcript.words().map(|w| w.unwrap()).collect();
        assert_eq!(words, vec!["SOS", "SOS"]);
    }

    #[test]
    fn silence_fails_calibration() {
        let mut source = MemorySource::new(vec![0; 5000], RATE, 16);
        assert!(matches!(
            decode_source(&mut source, &DecoderConfig::default()),
            Err(MorseError::Calibration { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DecoderConfig {
            dash_min_blocks: 0,
            ..Default::default()
        };
        assert!(matches!(
            MorseDecoder::new(RATE, 16, &config),
            Err(MorseError::InvalidConfig(_))
        ));
    }
}
