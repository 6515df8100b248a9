// src/generator.rs
// Morse code WAV file generator for testing

use crate::error::Result;
use crate::morse;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;
use std::time::Duration;

pub struct MorseGenerator {
    sample_rate: u32,
    frequency: f32,
    dot_duration: f32,
    dash_duration: f32,
    element_gap: f32,
    letter_gap: f32,
    word_gap: f32,
    lead_in: f32,
    trail_out: f32,
}

impl MorseGenerator {
    pub fn new(sample_rate: u32, frequency: f32, wpm: f32) -> Self {
        let dot_duration = 1.2 / wpm; // seconds per dot
        Self {
            sample_rate,
            frequency,
            dot_duration,
            dash_duration: 3.0 * dot_duration,
            element_gap: dot_duration,
            letter_gap: 3.0 * dot_duration,
            word_gap: 7.0 * dot_duration,
            lead_in: 0.0,
            trail_out: 0.0,
        }
    }

    /// Silence written before the first element.
    pub fn with_lead_in(mut self, lead_in: Duration) -> Self {
        self.lead_in = lead_in.as_secs_f32();
        self
    }

    /// Silence written after the last element.
    pub fn with_trail_out(mut self, trail_out: Duration) -> Self {
        self.trail_out = trail_out.as_secs_f32();
        self
    }

    /// 16-bit mono samples for `text`. Characters without a Morse code are
    /// skipped.
    pub fn samples(&self, text: &str) -> Vec<i16> {
        let mut out = Vec::new();
        self.push_silence(&mut out, self.lead_in);

        for element in text_to_morse(text) {
            match element {
                MorseElement::Dot => self.push_tone(&mut out, self.dot_duration),
                MorseElement::Dash => self.push_tone(&mut out, self.dash_duration),
                MorseElement::ElementGap => self.push_silence(&mut out, self.element_gap),
                MorseElement::LetterGap => self.push_silence(&mut out, self.letter_gap),
                MorseElement::WordGap => self.push_silence(&mut out, self.word_gap),
            }
        }
        self.push_silence(&mut out, self.trail_out);
        out
    }

    pub fn generate_wav_file<P: AsRef<Path>>(&self, text: &str, path: P) -> Result<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(path, spec)?;
        for sample in self.samples(text) {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    fn sample_count(&self, duration: f32) -> usize {
        (duration * self.sample_rate as f32).round() as usize
    }

    fn push_tone(&self, out: &mut Vec<i16>, duration: f32) {
        let amplitude = 0.5; // 50% amplitude to avoid clipping
        for i in 0..self.sample_count(duration) {
            let t = i as f32 / self.sample_rate as f32;
            let sample = (2.0 * PI * self.frequency * t).sin();
            out.push((sample * amplitude * i16::MAX as f32) as i16);
        }
    }

    fn push_silence(&self, out: &mut Vec<i16>, duration: f32) {
        out.resize(out.len() + self.sample_count(duration), 0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MorseElement {
    Dot,
    Dash,
    ElementGap,
    LetterGap,
    WordGap,
}

fn text_to_morse(text: &str) -> Vec<MorseElement> {
    let mut result = Vec::new();
    let words: Vec<Vec<&str>> = text
        .split_whitespace()
        .map(|word| word.chars().filter_map(morse::encode).collect::<Vec<_>>())
        .filter(|letters| !letters.is_empty())
        .collect();

    for (word_idx, letters) in words.iter().enumerate() {
        if word_idx > 0 {
            result.push(MorseElement::WordGap);
        }
        for (letter_idx, code) in letters.iter().enumerate() {
            if letter_idx > 0 {
                result.push(MorseElement::LetterGap);
            }
            for (elem_idx, mark) in code.chars().enumerate() {
                if elem_idx > 0 {
                    result.push(MorseElement::ElementGap);
                }
                result.push(if mark == '-' {
                    MorseElement::Dash
                } else {
                    MorseElement::Dot
                });
            }
        }
    }

    result
}
