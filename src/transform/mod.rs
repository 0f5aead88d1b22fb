/*! TEI to tables transformation

A single forward pass over each document:

1. every segment (`<u>`) is scanned, its children classified ([classify]),
1. its audio clip is resolved and apportioned over its tokens ([apportion]),
1. token, incident, segment and search vector rows are emitted ([segment]),
1. once every segment is done, the document row is emitted and the document's
   audio is concatenated and checked against the audio cursor ([document]).

Cursors ([cursor]) and interning tables live in a [CorpusState] that is threaded
through every call and never reset between documents.
!*/
pub mod apportion;
pub mod classify;
pub mod cursor;
mod document;
mod segment;
pub mod state;
pub mod vector;

use std::path::{Path, PathBuf};

use crate::audio::AudioSource;
use crate::config::Config;
use crate::registry::DocumentTable;

pub use classify::Classifier;
pub use cursor::{CursorState, FrameClock, Span};
pub use document::DocumentSummary;
pub use segment::SegmentSummary;
pub use state::{CorpusState, Snapshot};
pub use vector::yes_no;

/// Converts documents, sharing configuration and collaborators.
pub struct Transformer<'a> {
    config: &'a Config,
    classifier: Classifier,
    clock: FrameClock,
    audio: &'a dyn AudioSource,
    table: &'a DocumentTable,
    media_dst: PathBuf,
}

impl<'a> Transformer<'a> {
    /// `media_dst` receives the concatenated audio of each document.
    pub fn new(
        config: &'a Config,
        audio: &'a dyn AudioSource,
        table: &'a DocumentTable,
        media_dst: &Path,
    ) -> Self {
        Self {
            config,
            classifier: Classifier::new(config),
            clock: FrameClock::new(config.frame_rate),
            audio,
            table,
            media_dst: media_dst.to_path_buf(),
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// File name of the concatenated audio of `document`.
    pub fn media_name(&self, document: &str) -> String {
        format!("{document}.{}", self.config.clip_extension)
    }

    pub fn media_path(&self, document: &str) -> PathBuf {
        self.media_dst.join(self.media_name(document))
    }

    /// Where the audio of `document` is written until the document converted.
    pub fn partial_media_path(&self, document: &str) -> PathBuf {
        self.media_dst
            .join(format!("{}.part", self.media_name(document)))
    }
}
