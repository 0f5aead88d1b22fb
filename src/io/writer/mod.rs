/*!
# Table writing

Every output table is a delimited file with a header row, filled in encounter order.

Rows of a document go through a [RowSink]: they are first collected in a [DocumentBatch],
then committed to [TableFiles] once the document converted without error.
Lookup tables (forms, lemmas, speakers) are written at the end with [lookup].
!*/
pub mod lookup;
pub mod rows;
mod sink;
mod table;
mod writertrait;

pub use rows::{DocumentRow, IncidentRow, SegmentRow, TokenRow, VectorRow};
pub use sink::{DocumentBatch, RowSink, TableFiles};
pub use table::TableWriter;
pub use writertrait::WriterTrait;
