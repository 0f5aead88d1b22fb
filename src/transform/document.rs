//! Conversion of a whole TEI document.
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::error::Error;
use crate::io::writer::{DocumentRow, RowSink};

use super::apportion::DocumentAudio;
use super::state::CorpusState;
use super::{Span, Transformer};

/// Removes a media file left by a failed concatenation.
fn discard(path: &Path) -> Result<(), Error> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MediaRef<'a> {
    audio: &'a str,
}

/// What a document conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub document_id: u64,
    pub segments: usize,
    pub tokens: usize,
    pub incidents: usize,
    pub char_range: Span,
    pub frame_range: Span,
    /// Measured duration of the concatenated audio, in seconds.
    pub duration: f64,
}

impl Transformer<'_> {
    /// Converts the TEI document `xml` named `name`, writing its rows to `sink`.
    ///
    /// The state is left advanced even on error: callers wanting to discard a failed
    /// document restore a [super::Snapshot] taken beforehand.
    pub fn document(
        &self,
        name: &str,
        xml: &str,
        state: &mut CorpusState,
        sink: &mut dyn RowSink,
    ) -> Result<DocumentSummary, Error> {
        let metadata = self
            .table
            .row(name)
            .ok_or_else(|| Error::UnknownDocument(name.to_string()))?;
        let tree = roxmltree::Document::parse(xml)?;
        let title = tree
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "title")
            .and_then(|n| n.text())
            .unwrap_or_default()
            .trim()
            .to_string();

        // open
        let open = state.cursors.checkpoint();
        let mut audio = DocumentAudio::default();
        let mut segments = 0;
        let mut tokens = 0;
        let mut incidents = 0;

        for container in tree
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == self.config.sentence_tag)
        {
            let summary = self.segment(name, container, state, &mut audio, sink)?;
            segments += 1;
            tokens += summary.tokens;
            incidents += summary.incidents;
        }

        // close
        let char_range = state.cursors.close_document(&open);
        let frame_range = self.clock.span(open.audio, state.cursors.audio_cursor());

        let media_name = self.media_name(name);
        let partial = self.partial_media_path(name);
        let duration = match self.audio.concatenate(name, audio.processed(), &partial) {
            Ok(duration) => duration,
            Err(e) => {
                discard(&partial)?;
                return Err(e);
            }
        };
        let expected = state.cursors.audio_cursor() - open.audio - audio.padding();
        if duration.round() as i64 != expected.round() as i64 {
            discard(&partial)?;
            return Err(Error::DurationMismatch {
                document: name.to_string(),
                expected: expected.round() as i64,
                measured: duration.round() as i64,
            });
        }
        if partial.exists() {
            std::fs::rename(&partial, self.media_path(name))?;
        }
        debug!(
            "{name}: {} clips, {duration:.3}s",
            audio.processed().len()
        );

        state.schema.register_document(name, self.table);
        let document_id = state.cursors.next_document_id();
        sink.document(DocumentRow {
            document_id,
            id: name.to_string(),
            title,
            metadata: metadata.to_vec(),
            char_range,
            frame_range,
            media: serde_json::to_string(&MediaRef { audio: &media_name })?,
        })?;

        info!("{name}: {segments} segments, {tokens} tokens, {incidents} incidents");
        Ok(DocumentSummary {
            document_id,
            segments,
            tokens,
            incidents,
            char_range,
            frame_range,
            duration,
        })
    }
}
