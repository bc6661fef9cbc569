//! Shared type definitions

use serde::{Deserialize, Serialize};

/// One block of a whisper-diarization subtitle file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizedSegment {
    /// Start time in seconds
    pub start_timestamp: f64,
    /// End time in seconds
    pub end_timestamp: f64,
    /// Raw speaker label (e.g. "Speaker 1")
    pub speaker: String,
    /// Spoken text
    pub content: String,
}

impl DiarizedSegment {
    /// Word tokens of the segment, split on single spaces.
    ///
    /// Consecutive spaces yield empty tokens; each token still consumes
    /// one word timing during merging.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.content.split(' ')
    }

    /// Speaker label in canonical form ("Speaker 1" -> "speaker_1")
    pub fn speaker_label(&self) -> String {
        normalize_speaker_label(&self.speaker)
    }
}

/// Lowercase a speaker label and replace every space with an underscore
pub fn normalize_speaker_label(speaker: &str) -> String {
    speaker.replace(' ', "_").to_lowercase()
}

/// Word-level timestamp from whisper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Recognized text, possibly with surrounding whitespace
    pub text: String,
}

/// Kind of a transcript item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Pronunciation,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Pronunciation => write!(f, "pronunciation"),
        }
    }
}

/// A single transcribed word with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedItem {
    pub start_time: f64,
    pub end_time: f64,
    pub content: String,
    pub confidence: f64,
    pub item_type: ItemType,
}

impl MergedItem {
    /// Create a pronunciation item with full confidence
    pub fn pronunciation(start_time: f64, end_time: f64, content: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            content: content.into(),
            confidence: 1.0,
            item_type: ItemType::Pronunciation,
        }
    }
}

/// Per-word speaker attribution inside a speaker segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerItem {
    pub start_time: f64,
    pub end_time: f64,
    pub speaker_label: String,
}

/// Contiguous span attributed to one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start of the first word in seconds
    pub start_time: f64,
    /// End of the last word in seconds
    pub end_time: f64,
    /// Normalized speaker label
    pub speaker_label: String,
    pub items: Vec<SpeakerItem>,
}

/// Merged transcript, ready for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Diarized segment texts joined with single spaces
    pub transcript: String,
    /// Number of distinct raw speaker labels
    pub speaker_count: usize,
    pub segments: Vec<SpeakerSegment>,
    pub items: Vec<MergedItem>,
}
