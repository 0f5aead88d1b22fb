//! Document metadata table.
use std::{collections::HashMap, io::Read, path::Path};

use log::{debug, warn};

use crate::error::Error;

use super::PersonRegistry;

pub const DOC_ID: &str = "DocID";
pub const SPEAKER_ID: &str = "SpeakerID";
pub const DIALECT: &str = "Dialect area";

/// Tab separated metadata, one row per document.
///
/// `DocID` keys the rows, `Dialect area` is moved onto the speaker registry
/// and the remaining (non-skipped) columns are kept in table order.
#[derive(Debug, Default, Clone)]
pub struct DocumentTable {
    columns: Vec<String>,
    rows: HashMap<String, Vec<String>>,
}

impl DocumentTable {
    pub fn from_path(
        path: &Path,
        skip: &[String],
        persons: &mut PersonRegistry,
    ) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, &path.to_string_lossy(), skip, persons)
    }

    /// `source` only names the table in errors.
    pub fn from_reader<R: Read>(
        reader: R,
        source: &str,
        skip: &[String],
        persons: &mut PersonRegistry,
    ) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .trim(csv::Trim::All)
            .quoting(false)
            .from_reader(reader);

        let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let position = |column: &str| {
            header
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| Error::MissingColumn {
                    file: source.to_string(),
                    column: column.to_string(),
                })
        };
        let doc_idx = position(DOC_ID)?;
        let speaker_idx = position(SPEAKER_ID)?;
        let dialect_idx = position(DIALECT)?;

        let kept: Vec<usize> = (0..header.len())
            .filter(|&i| i != doc_idx && i != dialect_idx && !skip.contains(&header[i]))
            .collect();
        let columns = kept.iter().map(|&i| header[i].clone()).collect();

        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or_default().to_string();

            let speaker = field(speaker_idx);
            persons.entry(&speaker).set("dialect", field(dialect_idx));

            let doc_id = field(doc_idx);
            let values = kept.iter().map(|&i| field(i)).collect();
            if rows.insert(doc_id.clone(), values).is_some() {
                warn!("{source}: duplicate row for document {doc_id}, keeping the last one");
            }
        }
        debug!("{source}: {} documents", rows.len());

        Ok(Self { columns, rows })
    }

    /// Kept column names, in table order (`SpeakerID` included).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, doc: &str) -> bool {
        self.rows.contains_key(doc)
    }

    /// Values of a document, aligned with [Self::columns].
    pub fn row(&self, doc: &str) -> Option<&[String]> {
        self.rows.get(doc).map(Vec::as_slice)
    }

    pub fn value(&self, doc: &str, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .get(doc)
            .and_then(|r| r.get(idx))
            .map(String::as_str)
    }

    pub fn speaker(&self, doc: &str) -> Option<&str> {
        self.value(doc, SPEAKER_ID)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
