//! Merge error types

use thiserror::Error;

/// Merge-related errors
#[derive(Error, Debug)]
pub enum MergeError {
    /// Word timings ran out before every diarized word was matched
    #[error(
        "Word timings exhausted at index {index} while merging segment {segment} (word {word:?}); \
         the subtitle and word timing inputs are out of sync"
    )]
    WordsExhausted {
        /// Cursor position that had no word timing
        index: usize,
        /// Zero-based segment ordinal
        segment: usize,
        /// Diarized token left without a timing
        word: String,
    },
}
