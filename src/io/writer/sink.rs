/*! Row sinks

[RowSink] receives the rows produced by a document conversion.
[DocumentBatch] keeps them in memory until the document is complete,
[TableFiles] appends them to the table files.
!*/
use std::path::Path;

use log::info;

use crate::error::Error;

use super::rows::{DocumentRow, IncidentRow, SegmentRow, TokenRow, VectorRow};
use super::{TableWriter, WriterTrait};

pub trait RowSink {
    fn document(&mut self, row: DocumentRow) -> Result<(), Error>;
    fn segment(&mut self, row: SegmentRow) -> Result<(), Error>;
    fn token(&mut self, row: TokenRow) -> Result<(), Error>;
    fn incident(&mut self, row: IncidentRow) -> Result<(), Error>;
    fn vector(&mut self, row: VectorRow) -> Result<(), Error>;
}

/// Rows of a single document, in production order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentBatch {
    pub documents: Vec<DocumentRow>,
    pub segments: Vec<SegmentRow>,
    pub tokens: Vec<TokenRow>,
    pub incidents: Vec<IncidentRow>,
    pub vectors: Vec<VectorRow>,
}

impl DocumentBatch {
    /// Hands every row over to `sink`.
    pub fn commit<S: RowSink + ?Sized>(self, sink: &mut S) -> Result<(), Error> {
        for row in self.documents {
            sink.document(row)?;
        }
        for row in self.segments {
            sink.segment(row)?;
        }
        for row in self.tokens {
            sink.token(row)?;
        }
        for row in self.incidents {
            sink.incident(row)?;
        }
        for row in self.vectors {
            sink.vector(row)?;
        }
        Ok(())
    }
}

impl RowSink for DocumentBatch {
    fn document(&mut self, row: DocumentRow) -> Result<(), Error> {
        self.documents.push(row);
        Ok(())
    }

    fn segment(&mut self, row: SegmentRow) -> Result<(), Error> {
        self.segments.push(row);
        Ok(())
    }

    fn token(&mut self, row: TokenRow) -> Result<(), Error> {
        self.tokens.push(row);
        Ok(())
    }

    fn incident(&mut self, row: IncidentRow) -> Result<(), Error> {
        self.incidents.push(row);
        Ok(())
    }

    fn vector(&mut self, row: VectorRow) -> Result<(), Error> {
        self.vectors.push(row);
        Ok(())
    }
}

/// The `document`, `segment`, `token`, `incident` and `fts_vector` tables.
pub struct TableFiles {
    documents: TableWriter<DocumentRow>,
    segments: TableWriter<SegmentRow>,
    tokens: TableWriter<TokenRow>,
    incidents: TableWriter<IncidentRow>,
    vectors: TableWriter<VectorRow>,
}

impl TableFiles {
    /// Creates the tables in `dst`. `columns` are the kept metadata columns of documents.
    pub fn create(dst: &Path, columns: &[String], delimiter: u8) -> Result<Self, Error> {
        Ok(Self {
            documents: TableWriter::create(
                dst,
                "document",
                DocumentRow::header(columns),
                delimiter,
            )?,
            segments: TableWriter::create(dst, "segment", SegmentRow::HEADER, delimiter)?,
            tokens: TableWriter::create(dst, "token", TokenRow::HEADER, delimiter)?,
            incidents: TableWriter::create(dst, "incident", IncidentRow::HEADER, delimiter)?,
            vectors: TableWriter::create(dst, "fts_vector", VectorRow::HEADER, delimiter)?,
        })
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.documents.flush()?;
        self.segments.flush()?;
        self.tokens.flush()?;
        self.incidents.flush()?;
        self.vectors.flush()?;
        info!(
            "written {} documents, {} segments, {} tokens, {} incidents",
            self.documents.rows(),
            self.segments.rows(),
            self.tokens.rows(),
            self.incidents.rows()
        );
        Ok(())
    }
}

impl RowSink for TableFiles {
    fn document(&mut self, row: DocumentRow) -> Result<(), Error> {
        self.documents.write_single(&row)
    }

    fn segment(&mut self, row: SegmentRow) -> Result<(), Error> {
        self.segments.write_single(&row)
    }

    fn token(&mut self, row: TokenRow) -> Result<(), Error> {
        self.tokens.write_single(&row)
    }

    fn incident(&mut self, row: IncidentRow) -> Result<(), Error> {
        self.incidents.write_single(&row)
    }

    fn vector(&mut self, row: VectorRow) -> Result<(), Error> {
        self.vectors.write_single(&row)
    }
}

#[cfg(test)]
mod tests {
    use crate::transform::Span;

    use super::*;

    #[test]
    fn batch_commit_to_files() {
        let dst = tempfile::tempdir().unwrap();
        let columns = vec!["SpeakerID".to_string(), "Tool".to_string()];
        let mut files = TableFiles::create(dst.path(), &columns, b'\t').unwrap();

        let mut batch = DocumentBatch::default();
        batch
            .segment(SegmentRow {
                segment_id: "s1".to_string(),
                who_id: "1007".to_string(),
                char_range: Span::new(1, 2),
                frame_range: Span::new(1, 2),
                audio: "d1-T1".to_string(),
                file_present: false,
            })
            .unwrap();
        batch
            .document(DocumentRow {
                document_id: 1,
                id: "d1".to_string(),
                title: "Interview".to_string(),
                metadata: vec!["1007".to_string(), "EXMARaLDA".to_string()],
                char_range: Span::new(1, 3),
                frame_range: Span::new(1, 2),
                media: r#"{"audio":"d1.wav"}"#.to_string(),
            })
            .unwrap();
        batch.commit(&mut files).unwrap();
        files.flush().unwrap();

        let segments = std::fs::read_to_string(dst.path().join("segment.csv")).unwrap();
        assert_eq!(
            segments,
            "segment_id\twho_id\tchar_range\tframe_range\taudio\tfile_present\n\
             s1\t1007\t[1,2)\t[1,2)\td1-T1\tno\n"
        );

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(dst.path().join("document.csv"))
            .unwrap();
        assert_eq!(reader.headers().unwrap().get(3), Some("who_id"));
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(4), Some("EXMARaLDA"));
        assert_eq!(record.get(7), Some(r#"{"audio":"d1.wav"}"#));
    }
}
