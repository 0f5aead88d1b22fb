/*! Corpus-wide registries

Speakers ([PersonRegistry]) and document metadata ([DocumentTable]) are loaded once before
any document is converted, and only read (or extended with unknown speakers) afterwards.
!*/
mod metadata;
mod person;

pub use metadata::{DocumentTable, DIALECT, DOC_ID, SPEAKER_ID};
pub use person::{Person, PersonRegistry};
