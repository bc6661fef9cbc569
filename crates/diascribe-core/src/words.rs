//! Loader for whisper word timings
//!
//! Whisper serializes its output as a list of segments, each carrying a
//! `words` list of `[start, end, text]` triples. Segment boundaries are
//! irrelevant for merging, so the words are flattened into one sequence.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

use crate::error::WordTimingError;
use crate::types::WordTiming;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Whisper segment as stored on disk; other fields are ignored
#[derive(Debug, Deserialize)]
struct WhisperSegment {
    words: Vec<WhisperWord>,
}

/// `[start, end, text, ...]`; trailing elements such as the word
/// probability are skipped
#[derive(Debug)]
struct WhisperWord(WordTiming);

impl<'de> Deserialize<'de> for WhisperWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WordVisitor;

        impl<'de> Visitor<'de> for WordVisitor {
            type Value = WhisperWord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [start, end, text] word array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WhisperWord, A::Error> {
                let start = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let end = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let text = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(WhisperWord(WordTiming { start, end, text }))
            }
        }

        deserializer.deserialize_seq(WordVisitor)
    }
}

/// Parse whisper JSON into a flat list of word timings
pub fn parse_word_timings(json: &str) -> Result<Vec<WordTiming>, WordTimingError> {
    let segments: Vec<WhisperSegment> =
        serde_json::from_str(json.trim_start_matches(BYTE_ORDER_MARK))?;

    let words = segments
        .into_iter()
        .flat_map(|segment| segment.words)
        .map(|WhisperWord(word)| word)
        .collect();

    Ok(words)
}

/// Load whisper word timings from a JSON file
pub fn load_word_timings<P: AsRef<Path>>(path: P) -> Result<Vec<WordTiming>, WordTimingError> {
    let path = path.as_ref();
    debug!("Loading word timings: {}", path.display());

    let json = fs::read_to_string(path)?;
    let words = parse_word_timings(&json)?;

    debug!("Loaded {} word timings", words.len());
    Ok(words)
}
