//! Transcript export in the AWS Transcribe JSON layout

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::types::{MergedItem, SpeakerItem, SpeakerSegment, TranscriptDocument};

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transcript exporter
pub struct Exporter;

impl Exporter {
    /// Write the transcript as pretty-printed JSON
    pub fn to_json<P: AsRef<Path>>(
        document: &TranscriptDocument,
        output_path: P,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        // Render first so a failure leaves no partial file behind
        let json = Self::render(document)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(output_path, json)?;
        Ok(())
    }

    /// Render the transcript as pretty-printed JSON with four-space indentation
    pub fn render(document: &TranscriptDocument) -> Result<Vec<u8>, ExportError> {
        let data = JsonTranscript::from_document(document);

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        data.serialize(&mut serializer)?;

        Ok(buffer)
    }
}

/// Render a number the way the target schema expects: a shortest
/// round-trip decimal that always keeps a fractional part.
///
/// Values below 1e-4 or from 1e16 upward switch to exponent notation
/// with an explicit sign and at least two exponent digits (`1e-05`,
/// `1.5e+16`).
pub fn format_number(value: f64) -> String {
    let rendered = format!("{:?}", value);
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

#[derive(Serialize)]
struct JsonTranscript {
    results: JsonResults,
}

#[derive(Serialize)]
struct JsonResults {
    transcripts: Vec<JsonTranscriptText>,
    speaker_labels: JsonSpeakerLabels,
    items: Vec<JsonItem>,
}

#[derive(Serialize)]
struct JsonTranscriptText {
    transcript: String,
}

#[derive(Serialize)]
struct JsonSpeakerLabels {
    speakers: usize,
    segments: Vec<JsonSegment>,
}

#[derive(Serialize)]
struct JsonSegment {
    start_time: String,
    end_time: String,
    speaker_label: String,
    items: Vec<JsonSpeakerItem>,
}

#[derive(Serialize)]
struct JsonSpeakerItem {
    start_time: String,
    end_time: String,
    speaker_label: String,
}

#[derive(Serialize)]
struct JsonItem {
    start_time: String,
    end_time: String,
    alternatives: Vec<JsonAlternative>,
    #[serde(rename = "type")]
    item_type: String,
}

#[derive(Serialize)]
struct JsonAlternative {
    content: String,
    confidence: String,
}

impl JsonTranscript {
    fn from_document(document: &TranscriptDocument) -> Self {
        Self {
            results: JsonResults {
                transcripts: vec![JsonTranscriptText {
                    transcript: document.transcript.clone(),
                }],
                speaker_labels: JsonSpeakerLabels {
                    speakers: document.speaker_count,
                    segments: document.segments.iter().map(JsonSegment::from).collect(),
                },
                items: document.items.iter().map(JsonItem::from).collect(),
            },
        }
    }
}

impl From<&SpeakerSegment> for JsonSegment {
    fn from(segment: &SpeakerSegment) -> Self {
        Self {
            start_time: format_number(segment.start_time),
            end_time: format_number(segment.end_time),
            speaker_label: segment.speaker_label.clone(),
            items: segment.items.iter().map(JsonSpeakerItem::from).collect(),
        }
    }
}

impl From<&SpeakerItem> for JsonSpeakerItem {
    fn from(item: &SpeakerItem) -> Self {
        Self {
            start_time: format_number(item.start_time),
            end_time: format_number(item.end_time),
            speaker_label: item.speaker_label.clone(),
        }
    }
}

impl From<&MergedItem> for JsonItem {
    fn from(item: &MergedItem) -> Self {
        Self {
            start_time: format_number(item.start_time),
            end_time: format_number(item.end_time),
            alternatives: vec![JsonAlternative {
                content: item.content.clone(),
                confidence: format_number(item.confidence),
            }],
            item_type: item.item_type.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_document() -> TranscriptDocument {
        TranscriptDocument {
            transcript: "hello world".to_string(),
            speaker_count: 1,
            segments: vec![SpeakerSegment {
                start_time: 0.0,
                end_time: 0.9,
                speaker_label: "speaker_1".to_string(),
                items: vec![
                    SpeakerItem {
                        start_time: 0.0,
                        end_time: 0.4,
                        speaker_label: "speaker_1".to_string(),
                    },
                    SpeakerItem {
                        start_time: 0.4,
                        end_time: 0.9,
                        speaker_label: "speaker_1".to_string(),
                    },
                ],
            }],
            items: vec![
                MergedItem::pronunciation(0.0, 0.4, "hello"),
                MergedItem::pronunciation(0.4, 0.9, "world"),
            ],
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(0.4), "0.4");
        assert_eq!(format_number(3723.004), "3723.004");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn test_format_number_exponents() {
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(2.5e-7), "2.5e-07");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e16), "1.5e+16");
        assert_eq!(format_number(1e-100), "1e-100");
    }

    #[test]
    fn test_render_schema() {
        let rendered = Exporter::render(&sample_document()).unwrap();
        let value: Value = serde_json::from_slice(&rendered).unwrap();

        let expected = json!({
            "results": {
                "transcripts": [{ "transcript": "hello world" }],
                "speaker_labels": {
                    "speakers": 1,
                    "segments": [{
                        "start_time": "0.0",
                        "end_time": "0.9",
                        "speaker_label": "speaker_1",
                        "items": [
                            { "start_time": "0.0", "end_time": "0.4", "speaker_label": "speaker_1" },
                            { "start_time": "0.4", "end_time": "0.9", "speaker_label": "speaker_1" }
                        ]
                    }]
                },
                "items": [
                    {
                        "start_time": "0.0",
                        "end_time": "0.4",
                        "alternatives": [{ "content": "hello", "confidence": "1.0" }],
                        "type": "pronunciation"
                    },
                    {
                        "start_time": "0.4",
                        "end_time": "0.9",
                        "alternatives": [{ "content": "world", "confidence": "1.0" }],
                        "type": "pronunciation"
                    }
                ]
            }
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn test_render_is_indented_with_four_spaces_in_schema_order() {
        let rendered = String::from_utf8(Exporter::render(&sample_document()).unwrap()).unwrap();
        assert!(rendered.starts_with("{\n    \"results\": {\n        \"transcripts\": ["));

        let transcripts = rendered.find("\"transcripts\"").unwrap();
        let speaker_labels = rendered.find("\"speaker_labels\"").unwrap();
        let items = rendered.rfind("\"type\"").unwrap();
        assert!(transcripts < speaker_labels && speaker_labels < items);
    }

    #[test]
    fn test_to_json_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("talk.json");

        Exporter::to_json(&sample_document(), &path).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["results"]["speaker_labels"]["speakers"], 1);
    }
}
