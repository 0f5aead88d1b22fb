//! Mutable state shared by every document of a corpus.
use crate::intern::Interner;
use crate::registry::PersonRegistry;
use crate::schema::{Schema, SchemaSnapshot};

use super::cursor::{CursorState, FrameClock};

/// Cursors, interning tables, categorical domains and speakers.
///
/// Owned by the corpus driver and lent to one document conversion at a time.
#[derive(Debug, Clone)]
pub struct CorpusState {
    pub cursors: CursorState,
    pub forms: Interner,
    pub lemmas: Interner,
    pub schema: Schema,
    pub persons: PersonRegistry,
}

/// Enough of a [CorpusState] to undo a failed document.
#[derive(Debug, Clone)]
pub struct Snapshot {
    cursors: CursorState,
    forms: usize,
    lemmas: usize,
    schema: SchemaSnapshot,
    persons: usize,
}

impl CorpusState {
    pub fn new(clock: &FrameClock, schema: Schema, persons: PersonRegistry) -> Self {
        Self {
            cursors: CursorState::new(clock),
            forms: Interner::default(),
            lemmas: Interner::default(),
            schema,
            persons,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursors: self.cursors,
            forms: self.forms.len(),
            lemmas: self.lemmas.len(),
            schema: self.schema.snapshot(),
            persons: self.persons.len(),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.cursors = snapshot.cursors;
        self.forms.truncate(snapshot.forms);
        self.lemmas.truncate(snapshot.lemmas);
        self.schema.restore(&snapshot.schema);
        self.persons.truncate(snapshot.persons);
    }
}
