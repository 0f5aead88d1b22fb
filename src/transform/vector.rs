//! Positional term vector of a segment, used for full-text search.
use itertools::Itertools;

use super::classify::TokenFlags;

/// Token attributes indexed for search, in vector order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorEntry {
    pub form: String,
    pub lemma: String,
    pub xpos: String,
    pub flags: TokenFlags,
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn quote(term: &str) -> String {
    term.replace('\'', "''")
}

/// `'1<form>':n '2<lemma>':n '3<xpos>':n '4<unclear>':n ... '9<unintelligible>':n` for each token `n`.
pub fn term_vector(entries: &[VectorEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .flat_map(|(idx, e)| {
            let n = idx + 1;
            let f = &e.flags;
            [
                e.form.as_str(),
                e.lemma.as_str(),
                e.xpos.as_str(),
                yes_no(f.unclear),
                yes_no(f.truncated),
                yes_no(f.vocal),
                yes_no(f.pause_before),
                yes_no(f.pause_after),
                yes_no(f.unintelligible),
            ]
            .into_iter()
            .enumerate()
            .map(move |(field, term)| format!("'{}{}':{}", field + 1, quote(term), n))
        })
        .join(" ")
}
