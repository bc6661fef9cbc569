//! diascribe-core - shared types and I/O for the diascribe converter
//!
//! Reads whisper-diarization subtitles and whisper word timings, and
//! exports merged transcripts in the AWS Transcribe JSON layout.

pub mod error;
pub mod exporter;
pub mod subtitle;
pub mod timestamp;
pub mod types;
pub mod words;

pub use error::{SubtitleError, WordTimingError};
pub use exporter::{ExportError, Exporter};
pub use subtitle::{read_segments, SubtitleReader};
pub use timestamp::timestamp_to_seconds;
pub use types::*;
pub use words::{load_word_timings, parse_word_timings};
