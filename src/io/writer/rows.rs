//! Output rows, one type per table.
use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::transform::Span;

fn yes_no<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(crate::transform::yes_no(*flag))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub token_id: u64,
    pub form_id: usize,
    pub lemma_id: usize,
    pub xpos: String,
    #[serde(serialize_with = "yes_no")]
    pub unclear: bool,
    #[serde(serialize_with = "yes_no")]
    pub truncated: bool,
    #[serde(serialize_with = "yes_no")]
    pub vocal: bool,
    #[serde(serialize_with = "yes_no")]
    pub pause_before: bool,
    #[serde(serialize_with = "yes_no")]
    pub pause_after: bool,
    #[serde(serialize_with = "yes_no")]
    pub unintelligible: bool,
    pub char_range: Span,
    pub frame_range: Span,
    pub segment_id: String,
}

impl TokenRow {
    pub const HEADER: &'static [&'static str] = &[
        "token_id",
        "form_id",
        "lemma_id",
        "xpos",
        "unclear",
        "truncated",
        "vocal",
        "pause_before",
        "pause_after",
        "unintelligible",
        "char_range",
        "frame_range",
        "segment_id",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRow {
    pub segment_id: String,
    pub who_id: String,
    pub char_range: Span,
    pub frame_range: Span,
    pub audio: String,
    #[serde(serialize_with = "yes_no")]
    pub file_present: bool,
}

impl SegmentRow {
    pub const HEADER: &'static [&'static str] = &[
        "segment_id",
        "who_id",
        "char_range",
        "frame_range",
        "audio",
        "file_present",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentRow {
    pub incident_id: u64,
    /// JSON object, `{"description": ...}`.
    pub meta: String,
    pub char_range: Span,
    pub segment_id: String,
}

impl IncidentRow {
    pub const HEADER: &'static [&'static str] =
        &["incident_id", "meta", "char_range", "segment_id"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorRow {
    pub segment_id: String,
    pub vector: String,
}

impl VectorRow {
    pub const HEADER: &'static [&'static str] = &["segment_id", "vector"];
}

/// Document row. Metadata values follow the metadata table's kept columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    pub document_id: u64,
    pub id: String,
    pub title: String,
    pub metadata: Vec<String>,
    pub char_range: Span,
    pub frame_range: Span,
    /// JSON object, `{"audio": "<document>.wav"}`.
    pub media: String,
}

impl DocumentRow {
    /// Header for the given metadata columns: `SpeakerID` becomes `who_id`,
    /// others are lowercased with spaces replaced by underscores.
    pub fn header(columns: &[String]) -> Vec<String> {
        let metadata = columns.iter().map(|c| {
            if c == crate::registry::SPEAKER_ID {
                "who_id".to_string()
            } else {
                c.replace(' ', "_").to_lowercase()
            }
        });

        ["document_id", "id", "title"]
            .iter()
            .map(|s| s.to_string())
            .chain(metadata)
            .chain(
                ["char_range", "frame_range", "media"]
                    .iter()
                    .map(|s| s.to_string()),
            )
            .collect()
    }
}

impl Serialize for DocumentRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(6 + self.metadata.len()))?;
        seq.serialize_element(&self.document_id)?;
        seq.serialize_element(&self.id)?;
        seq.serialize_element(&self.title)?;
        for value in &self.metadata {
            seq.serialize_element(value)?;
        }
        seq.serialize_element(&self.char_range)?;
        seq.serialize_element(&self.frame_range)?;
        seq.serialize_element(&self.media)?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_header() {
        let columns = vec![
            "SpeakerID".to_string(),
            "Transcription phase".to_string(),
        ];
        assert_eq!(
            DocumentRow::header(&columns),
            vec![
                "document_id",
                "id",
                "title",
                "who_id",
                "transcription_phase",
                "char_range",
                "frame_range",
                "media"
            ]
        );
    }

    #[test]
    fn token_row_as_json() {
        let row = TokenRow {
            token_id: 1,
            form_id: 2,
            lemma_id: 3,
            xpos: "NN".to_string(),
            unclear: true,
            truncated: false,
            vocal: false,
            pause_before: false,
            pause_after: true,
            unintelligible: false,
            char_range: Span::new(1, 4),
            frame_range: Span::new(1, 26),
            segment_id: "s".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["unclear"], "yes");
        assert_eq!(json["truncated"], "no");
        assert_eq!(json["char_range"], "[1,4)");
        assert_eq!(TokenRow::HEADER.len(), json.as_object().unwrap().len());
    }
}
