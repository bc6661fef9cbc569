//! Reader for whisper-diarization SRT output
//!
//! Each block spans four lines:
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:01,000
//! Speaker 1: hello world
//!
//! ```
//!
//! The reader yields one [`DiarizedSegment`] per block, lazily and in file
//! order. Running out of input anywhere inside a block ends the sequence
//! without an error; the incomplete block is dropped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::path::Path;

use tracing::debug;

use crate::error::SubtitleError;
use crate::timestamp::timestamp_to_seconds;
use crate::types::DiarizedSegment;

const TIME_RANGE_SEPARATOR: &str = " --> ";
const SPEAKER_SEPARATOR: &str = ": ";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Lazy iterator over the blocks of a diarized subtitle source
pub struct SubtitleReader<R> {
    lines: Lines<R>,
    line_number: usize,
    finished: bool,
}

impl SubtitleReader<BufReader<File>> {
    /// Open an SRT file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        debug!("Opening subtitle file: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> SubtitleReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            finished: false,
        }
    }

    /// Next trimmed line, or `None` at end of input
    fn next_line(&mut self) -> Result<Option<String>, SubtitleError> {
        let Some(line) = self.lines.next().transpose()? else {
            return Ok(None);
        };
        self.line_number += 1;

        let line = if self.line_number == 1 {
            line.trim_start_matches(BYTE_ORDER_MARK)
        } else {
            &line
        };
        Ok(Some(line.trim().to_string()))
    }

    fn read_block(&mut self) -> Result<Option<DiarizedSegment>, SubtitleError> {
        // Index line carries no information
        if self.next_line()?.is_none() {
            return Ok(None);
        }
        let Some(time_range) = self.next_line()? else {
            return Ok(None);
        };
        let time_range_line = self.line_number;
        let Some(speaker_line) = self.next_line()? else {
            return Ok(None);
        };
        let speaker_line_number = self.line_number;
        // Blank separator; a block without it is incomplete
        if self.next_line()?.is_none() {
            return Ok(None);
        }

        let (start, end) = time_range.split_once(TIME_RANGE_SEPARATOR).ok_or_else(|| {
            SubtitleError::MissingTimeRange {
                line: time_range_line,
                text: time_range.clone(),
            }
        })?;
        let (speaker, content) = speaker_line.split_once(SPEAKER_SEPARATOR).ok_or_else(|| {
            SubtitleError::MissingSpeaker {
                line: speaker_line_number,
                text: speaker_line.clone(),
            }
        })?;

        Ok(Some(DiarizedSegment {
            start_timestamp: timestamp_to_seconds(start)?,
            end_timestamp: timestamp_to_seconds(end)?,
            speaker: speaker.to_string(),
            content: content.to_string(),
        }))
    }
}

impl<R: BufRead> Iterator for SubtitleReader<R> {
    type Item = Result<DiarizedSegment, SubtitleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_block().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

impl<R: BufRead> FusedIterator for SubtitleReader<R> {}

/// Read every segment of an SRT file
pub fn read_segments<P: AsRef<Path>>(path: P) -> Result<Vec<DiarizedSegment>, SubtitleError> {
    let segments = SubtitleReader::open(path)?.collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} diarized segments", segments.len());
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(source: &str) -> Result<Vec<DiarizedSegment>, SubtitleError> {
        SubtitleReader::new(Cursor::new(source)).collect()
    }

    const TWO_BLOCKS: &str = "1\n\
        00:00:00,000 --> 00:00:01,000\n\
        Speaker 1: hello world\n\
        \n\
        2\n\
        00:00:01,500 --> 00:00:03,250\n\
        Speaker 2: how are you\n\
        \n";

    #[test]
    fn test_reads_blocks_in_order() {
        let segments = read(TWO_BLOCKS).unwrap();
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].speaker, "Speaker 1");
        assert_eq!(segments[0].content, "hello world");
        assert_eq!(segments[0].start_timestamp, 0.0);
        assert_eq!(segments[0].end_timestamp, 1.0);

        assert_eq!(segments[1].speaker, "Speaker 2");
        assert_eq!(segments[1].content, "how are you");
        assert_eq!(segments[1].start_timestamp, 1.5);
        assert_eq!(segments[1].end_timestamp, 3.25);
    }

    #[test]
    fn test_handles_crlf_and_bom() {
        let source = "\u{feff}1\r\n00:00:00,000 --> 00:00:01,000\r\nSpeaker 1: hi there \r\n\r\n";
        let segments = read(source).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "hi there");
    }

    #[test]
    fn test_truncated_trailing_block_is_dropped() {
        let mut source = TWO_BLOCKS.to_string();
        source.push_str("3\n00:00:04,000 --> 00:00:05,000\n");
        assert_eq!(read(&source).unwrap().len(), 2);

        // Missing blank separator at end of file
        let source = "1\n00:00:00,000 --> 00:00:01,000\nSpeaker 1: hello";
        assert!(read(source).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn test_content_keeps_later_colons() {
        let source = "1\n00:00:00,000 --> 00:00:01,000\nSpeaker 1: note: this\n\n";
        let segments = read(source).unwrap();
        assert_eq!(segments[0].content, "note: this");
    }

    #[test]
    fn test_missing_time_range_separator() {
        let source = "1\n00:00:00,000 00:00:01,000\nSpeaker 1: hello\n\n";
        match read(source) {
            Err(SubtitleError::MissingTimeRange { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_speaker_separator() {
        let mut source = TWO_BLOCKS.to_string();
        source.push_str("3\n00:00:04,000 --> 00:00:05,000\nno speaker here\n\n");
        match read(&source) {
            Err(SubtitleError::MissingSpeaker { line, .. }) => assert_eq!(line, 11),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timestamp() {
        let source = "1\n00:00:00.000 --> 00:00:01,000\nSpeaker 1: hello\n\n";
        assert!(matches!(read(source), Err(SubtitleError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_stops_after_error() {
        let source = "1\nbroken\nSpeaker 1: hello\n\n\
            2\n00:00:01,000 --> 00:00:02,000\nSpeaker 1: again\n\n";
        let mut reader = SubtitleReader::new(Cursor::new(source));
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_read_segments_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.srt");
        std::fs::write(&path, TWO_BLOCKS).unwrap();

        let segments = read_segments(&path).unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_segments(dir.path().join("absent.srt"));
        assert!(matches!(result, Err(SubtitleError::Io(_))));
    }
}
