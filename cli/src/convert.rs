//! Conversion pipeline: read both inputs, merge, export

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use diascribe_core::{load_word_timings, read_segments, Exporter};
use diascribe_diarization::{merge_segment_timings, merge_word_timings};
use tracing::{info, warn};

/// Source of item timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimingSource {
    /// Whisper word timings from `<input>.json`
    Words,
    /// Subtitle block timestamps; one item per segment
    Segments,
}

/// What a finished conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub segments: usize,
    pub items: usize,
    pub speakers: usize,
    pub mismatches: usize,
}

/// `<base>.<extension>`, appended rather than replacing any existing dot suffix
fn with_extension_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Convert `<input>.srt` (and `<input>.json` for word timing) into `output`
pub fn run(input: &Path, output: &Path, timing: TimingSource) -> anyhow::Result<ConversionSummary> {
    let srt_path = with_extension_suffix(input, "srt");
    let mut mismatches = 0;

    let document = match timing {
        TimingSource::Words => {
            let json_path = with_extension_suffix(input, "json");
            let words = load_word_timings(&json_path)
                .with_context(|| format!("Failed to load word timings from {}", json_path.display()))?;
            let segments = read_segments(&srt_path)
                .with_context(|| format!("Failed to read subtitles from {}", srt_path.display()))?;

            merge_word_timings(&segments, &words, |mismatch| {
                mismatches += 1;
                warn!(
                    "Word mismatch at {}: whisper {:?}, diarized {:?}",
                    mismatch.index, mismatch.whisper, mismatch.diarized
                );
            })
            .context("Failed to merge subtitles with word timings")?
        }
        TimingSource::Segments => {
            let segments = read_segments(&srt_path)
                .with_context(|| format!("Failed to read subtitles from {}", srt_path.display()))?;
            merge_segment_timings(&segments)
        }
    };

    Exporter::to_json(&document, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let summary = ConversionSummary {
        segments: document.segments.len(),
        items: document.items.len(),
        speakers: document.speaker_count,
        mismatches,
    };

    if summary.mismatches > 0 {
        warn!("{} word mismatches between subtitles and word timings", summary.mismatches);
    }
    info!(
        "Wrote {}: {} speakers, {} segments, {} items",
        output.display(),
        summary.speakers,
        summary.segments,
        summary.items
    );

    Ok(summary)
}
