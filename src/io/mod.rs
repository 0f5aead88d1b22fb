/*!
# IO utilities

Tabular output of the conversion. Inputs (TEI files, registries, audio) are read
by [crate::registry], [crate::audio] and [crate::pipeline].
!*/
pub mod writer;
