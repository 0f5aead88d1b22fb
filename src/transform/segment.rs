//! Conversion of a single segment (`<u>`) into token, incident, segment and vector rows.
use log::{debug, warn};
use roxmltree::Node as XmlNode;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Error;
use crate::io::writer::{IncidentRow, RowSink, SegmentRow, TokenRow, VectorRow};

use super::apportion::{clip_name, Apportionment, DocumentAudio};
use super::classify::Node;
use super::state::CorpusState;
use super::vector::{term_vector, VectorEntry};
use super::Transformer;

#[derive(Serialize)]
struct IncidentMeta<'a> {
    description: &'a str,
}

/// Row counts of a converted segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSummary {
    pub tokens: usize,
    pub incidents: usize,
}

impl Transformer<'_> {
    /// Speaker id of a segment, without the registry prefix.
    fn speaker(&self, container: &XmlNode) -> String {
        let who = container.attribute("who").unwrap_or_default().trim();
        who.strip_prefix(self.config.speaker_prefix.as_str())
            .unwrap_or(who)
            .trim()
            .to_string()
    }

    /// Converts `container`, writing its rows to `sink`.
    pub(crate) fn segment(
        &self,
        document: &str,
        container: XmlNode,
        state: &mut CorpusState,
        audio: &mut DocumentAudio,
        sink: &mut dyn RowSink,
    ) -> Result<SegmentSummary, Error> {
        // scan
        let nodes = self.classifier.classify_children(container);
        let chars: usize = nodes
            .iter()
            .map(|n| match n {
                Node::Token(t) => t.len(),
                _ => 0,
            })
            .sum();

        let who = self.speaker(&container);
        if state.persons.ensure(&who) {
            warn!("{document}: unknown speaker {who:?}");
        }

        let start = match container.attribute("start") {
            Some(start) => start,
            None => {
                warn!("{document}: segment without audio anchor at {:?}", container.range());
                ""
            }
        };
        let clip = clip_name(start, document, &self.config.clip_corrections);
        let segment_audio = audio.resolve(
            document,
            &clip,
            self.audio,
            &mut state.cursors,
            &self.clock,
        )?;

        // emit
        let open = state.cursors.checkpoint();
        let segment_id = Uuid::new_v4().to_string();
        let mut apportion =
            Apportionment::new(document, self.config.granularity, &segment_audio, chars);
        let mut entries = Vec::new();
        let mut summary = SegmentSummary::default();

        for node in nodes {
            match node {
                Node::Token(token) => {
                    let len = token.len();
                    let form_id = state.forms.intern(&token.form);
                    let lemma_id = state.lemmas.intern(&token.lemma);
                    state.schema.register_xpos(&token.xpos);

                    let char_range = state.cursors.advance_token(len);
                    let frame_range =
                        apportion.next(len, state.cursors.audio_cursor(), &self.clock)?;
                    let flags = token.flags;

                    sink.token(TokenRow {
                        token_id: state.cursors.next_token_id(),
                        form_id,
                        lemma_id,
                        xpos: token.xpos.clone(),
                        unclear: flags.unclear,
                        truncated: flags.truncated,
                        vocal: flags.vocal,
                        pause_before: flags.pause_before,
                        pause_after: flags.pause_after,
                        unintelligible: flags.unintelligible,
                        char_range,
                        frame_range,
                        segment_id: segment_id.clone(),
                    })?;
                    entries.push(VectorEntry {
                        form: token.form,
                        lemma: token.lemma,
                        xpos: token.xpos,
                        flags,
                    });
                    summary.tokens += 1;
                }
                Node::Incident { description } => {
                    let meta = serde_json::to_string(&IncidentMeta {
                        description: &description,
                    })?;
                    sink.incident(IncidentRow {
                        incident_id: state.cursors.next_incident_id(),
                        meta,
                        char_range: state.cursors.advance_incident(),
                        segment_id: segment_id.clone(),
                    })?;
                    summary.incidents += 1;
                }
                Node::Pause | Node::Ignored => {}
            }
        }

        // finalize
        let char_range = state.cursors.close_segment(&open);
        debug!(
            "{document}: segment {segment_id} {char_range} clip {clip} {}",
            segment_audio.audio.frames
        );
        sink.segment(SegmentRow {
            segment_id: segment_id.clone(),
            who_id: who,
            char_range,
            frame_range: segment_audio.audio.frames,
            audio: clip,
            file_present: segment_audio.audio.present,
        })?;
        sink.vector(VectorRow {
            segment_id,
            vector: term_vector(&entries),
        })?;

        Ok(summary)
    }
}
