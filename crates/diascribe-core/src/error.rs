//! Input error types

use thiserror::Error;

/// Errors raised while reading a diarized subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Timestamp is not of the form `HH:MM:SS,fff`
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Time range line has no ` --> ` separator
    #[error("Line {line}: expected \"<start> --> <end>\", got {text:?}")]
    MissingTimeRange { line: usize, text: String },

    /// Speaker line has no `: ` separator
    #[error("Line {line}: expected \"<speaker>: <text>\", got {text:?}")]
    MissingSpeaker { line: usize, text: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading whisper word timings
#[derive(Error, Debug)]
pub enum WordTimingError {
    /// Malformed JSON or unexpected structure (e.g. missing `words`)
    #[error("Invalid word timing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
