/*! String interning

Forms and lemmas are stored once and referenced by a small integer id.
Ids start at 1 and follow first-seen order for the whole corpus.
!*/
use std::collections::HashMap;

/// Bidirectional string <-> id table, iterated in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    ids: HashMap<String, usize>,
    values: Vec<String>,
}

impl Interner {
    /// Returns the id of `value`, allocating the next one if unseen.
    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(id) = self.ids.get(value) {
            return *id;
        }
        self.values.push(value.to_string());
        let id = self.values.len();
        self.ids.insert(value.to_string(), id);
        id
    }

    pub fn id(&self, value: &str) -> Option<usize> {
        self.ids.get(value).copied()
    }

    pub fn value(&self, id: usize) -> Option<&str> {
        id.checked_sub(1)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forget every value interned after the first `len` ones.
    pub fn truncate(&mut self, len: usize) {
        for value in self.values.drain(len.min(self.values.len())..) {
            self.ids.remove(&value);
        }
    }

    /// `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx + 1, value.as_str()))
    }
}
