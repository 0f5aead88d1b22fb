//! Corpus-wide lookup tables, written once every document is converted.
use std::path::Path;

use crate::error::Error;
use crate::intern::Interner;
use crate::registry::PersonRegistry;

use super::{TableWriter, WriterTrait};

/// `<dst>/<name>.csv` with `(id, value)` rows in id order.
pub fn write_interner(
    dst: &Path,
    name: &str,
    header: [&str; 2],
    interner: &Interner,
    delimiter: u8,
) -> Result<(), Error> {
    let mut writer = TableWriter::create(dst, name, header, delimiter)?;
    for row in interner.iter() {
        writer.write_single(&row)?;
    }
    writer.flush()
}

/// `global_attribute_who.csv`: speaker id and its properties as a JSON object.
pub fn write_speakers(dst: &Path, persons: &PersonRegistry, delimiter: u8) -> Result<(), Error> {
    let mut writer: TableWriter<(&str, String)> =
        TableWriter::create(dst, "global_attribute_who", ["who_id", "who"], delimiter)?;
    for (id, person) in persons.iter() {
        writer.write_single(&(id, person.to_json()?))?;
    }
    writer.flush()
}
