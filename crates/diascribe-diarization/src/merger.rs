//! Merge diarized segments with word-level timings

use std::collections::HashSet;

use diascribe_core::{
    DiarizedSegment, MergedItem, SpeakerItem, SpeakerSegment, TranscriptDocument, WordTiming,
};
use tracing::debug;

use crate::MergeError;

/// A diarized word whose whisper counterpart has different text.
///
/// Merging continues on a mismatch: the diarized text is kept and the
/// whisper timing is used as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct WordMismatch {
    /// Position in the word timing sequence
    pub index: usize,
    /// Text from the diarized subtitle
    pub diarized: String,
    /// Text from whisper
    pub whisper: String,
}

/// Forward-only position in the word timing sequence
struct WordCursor<'a> {
    words: &'a [WordTiming],
    position: usize,
}

impl<'a> WordCursor<'a> {
    fn new(words: &'a [WordTiming]) -> Self {
        Self { words, position: 0 }
    }

    /// Take the word under the cursor and move past it
    fn advance(&mut self) -> Option<(usize, &'a WordTiming)> {
        let index = self.position;
        let word = self.words.get(index)?;
        self.position += 1;
        Some((index, word))
    }

    fn consumed(&self) -> usize {
        self.position
    }
}

/// Merge diarized segments with whisper word timings
///
/// Every diarized word consumes exactly one word timing, in order. Items
/// take their content from the diarization and their timing from whisper;
/// segment boundaries come from the first and last word of the segment.
/// Text disagreements are reported through `on_mismatch` and do not stop
/// the merge.
pub fn merge_word_timings<F>(
    segments: &[DiarizedSegment],
    words: &[WordTiming],
    mut on_mismatch: F,
) -> Result<TranscriptDocument, MergeError>
where
    F: FnMut(&WordMismatch),
{
    let mut cursor = WordCursor::new(words);
    let mut items = Vec::new();
    let mut speaker_segments = Vec::with_capacity(segments.len());

    for (segment_index, segment) in segments.iter().enumerate() {
        let speaker_label = segment.speaker_label();
        let mut speaker_items = Vec::new();
        let mut bounds: Option<(f64, f64)> = None;

        for diarized_word in segment.words() {
            let (index, whisper_word) =
                cursor.advance().ok_or_else(|| MergeError::WordsExhausted {
                    index: cursor.consumed(),
                    segment: segment_index,
                    word: diarized_word.to_string(),
                })?;

            if whisper_word.text.trim() != diarized_word.trim() {
                on_mismatch(&WordMismatch {
                    index,
                    diarized: diarized_word.to_string(),
                    whisper: whisper_word.text.clone(),
                });
            }

            items.push(MergedItem::pronunciation(
                whisper_word.start,
                whisper_word.end,
                diarized_word,
            ));
            speaker_items.push(SpeakerItem {
                start_time: whisper_word.start,
                end_time: whisper_word.end,
                speaker_label: speaker_label.clone(),
            });

            let start = bounds.map_or(whisper_word.start, |(start, _)| start);
            bounds = Some((start, whisper_word.end));
        }

        // A segment always yields at least one (possibly empty) token
        if let Some((start_time, end_time)) = bounds {
            speaker_segments.push(SpeakerSegment {
                start_time,
                end_time,
                speaker_label,
                items: speaker_items,
            });
        }
    }

    debug!(
        "Merged {} segments using {} of {} word timings",
        segments.len(),
        cursor.consumed(),
        words.len()
    );

    Ok(build_document(segments, speaker_segments, items))
}

/// Merge diarized segments using their own subtitle timestamps
///
/// Each segment becomes a single item spanning the whole segment text.
/// No word timings are involved, so nothing is cross-checked.
pub fn merge_segment_timings(segments: &[DiarizedSegment]) -> TranscriptDocument {
    let mut items = Vec::with_capacity(segments.len());
    let mut speaker_segments = Vec::with_capacity(segments.len());

    for segment in segments {
        let speaker_label = segment.speaker_label();

        items.push(MergedItem::pronunciation(
            segment.start_timestamp,
            segment.end_timestamp,
            segment.content.as_str(),
        ));
        speaker_segments.push(SpeakerSegment {
            start_time: segment.start_timestamp,
            end_time: segment.end_timestamp,
            speaker_label: speaker_label.clone(),
            items: vec![SpeakerItem {
                start_time: segment.start_timestamp,
                end_time: segment.end_timestamp,
                speaker_label,
            }],
        });
    }

    build_document(segments, speaker_segments, items)
}

fn build_document(
    segments: &[DiarizedSegment],
    speaker_segments: Vec<SpeakerSegment>,
    items: Vec<MergedItem>,
) -> TranscriptDocument {
    let transcript = segments
        .iter()
        .map(|segment| segment.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    TranscriptDocument {
        transcript,
        speaker_count: count_speakers(segments),
        segments: speaker_segments,
        items,
    }
}

/// Count distinct raw speaker labels; normalization is not applied
fn count_speakers(segments: &[DiarizedSegment]) -> usize {
    segments
        .iter()
        .map(|segment| segment.speaker.as_str())
        .collect::<HashSet<_>>()
        .len()
}
