// src/segment.rs
// Splits a calibrated binary signal into words, letters and elements

use crate::error::{MorseError, Result};
use crate::morse;
use crate::signal::{SILENCE, Signal, TONE};
use crate::timing::Thresholds;

/// Hierarchical splitter. Each level splits on non-overlapping occurrences of
/// exactly its threshold's worth of silence; any leftover silence stays on
/// the neighbouring piece and is stripped at element level.
pub struct Segmenter {
    element_gap: String,
    letter_gap: String,
    word_gap: String,
    dash_min_blocks: usize,
}

impl Segmenter {
    pub fn new(thresholds: Thresholds, dash_min_blocks: usize) -> Self {
        let gap = |len: usize| SILENCE.to_string().repeat(len);
        Self {
            element_gap: gap(thresholds.element),
            letter_gap: gap(thresholds.letter),
            word_gap: gap(thresholds.word),
            dash_min_blocks,
        }
    }

    /// '-' for tokens longer than the dash limit, '.' for any other token
    /// holding tone, nothing for pure silence.
    pub fn classify_element(&self, token: &str) -> Option<char> {
        let body = token.trim_matches(SILENCE);
        if body.len() > self.dash_min_blocks {
            Some('-')
        } else if body.contains(TONE) {
            Some('.')
        } else {
            None
        }
    }

    /// Decodes one letter segment. Segments with no tone yield `None`.
    pub fn decode_letter(&self, segment: &str) -> Result<Option<char>> {
        let code: String = segment
            .split(self.element_gap.as_str())
            .filter_map(|token| self.classify_element(token))
            .collect();
        if code.is_empty() {
            return Ok(None);
        }
        morse::lookup(&code)
            .map(Some)
            .ok_or(MorseError::UnknownToken(code))
    }

    pub fn decode_word(&self, segment: &str) -> Result<String> {
        let mut word = String::new();
        for letter in segment.split(self.letter_gap.as_str()) {
            if let Some(ch) = self.decode_letter(letter)? {
                word.push(ch);
            }
        }
        Ok(word)
    }

    /// Lazily decodes the signal word by word. Segments that hold no letters
    /// (trailing silence, or silence longer than two word gaps) are skipped
    /// rather than printed as extra spaces, so a long pause mid-recording
    /// still yields a single space. Stops being useful after the first
    /// error; callers are expected to bail on it.
    pub fn words<'a>(&'a self, signal: &'a Signal) -> impl Iterator<Item = Result<String>> + 'a {
        signal
            .as_str()
            .split(self.word_gap.as_str())
            .map(|segment| self.decode_word(segment))
            .filter(|word| !matches!(word, Ok(w) if w.is_empty()))
    }

    /// Full text, with a space after every word.
    pub fn decode(&self, signal: &Signal) -> Result<String> {
        let mut text = String::new();
        for word in self.words(signal) {
            text.push_str(&word?);
            text.push(' ');
        }
        Ok(text)
    }
}
