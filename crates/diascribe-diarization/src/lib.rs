//! Merging of speaker diarization output with word-level timings
//!
//! whisper-diarization produces speaker-attributed sentences with coarse
//! timestamps, while whisper itself produces precise per-word timings
//! without speakers. This crate lines the two up word by word.

pub mod error;
pub mod merger;

pub use error::MergeError;
pub use merger::{merge_segment_timings, merge_word_timings, WordMismatch};

// Re-export types from diascribe-core
pub use diascribe_core::{DiarizedSegment, TranscriptDocument, WordTiming};
