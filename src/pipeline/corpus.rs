//! Corpus conversion pipeline
//!
//! # Processing
//! 1. The speaker registry and the document metadata table are loaded. Any error here is fatal.
//! 1. Every `*.xml` file of the source folder is converted, in path order, into a
//!    [DocumentBatch]. A document that fails is logged, rolled back and skipped.
//! 1. Batches of successful documents are appended to the tables.
//! 1. Interning tables, speakers and the schema descriptor are written last.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::audio::WavFolder;
use crate::config::Config;
use crate::error::Error;
use crate::io::writer::lookup::{write_interner, write_speakers};
use crate::io::writer::{DocumentBatch, TableFiles};
use crate::pipeline::pipeline::Pipeline;
use crate::registry::{DocumentTable, PersonRegistry};
use crate::schema::Schema;
use crate::transform::{CorpusState, DocumentSummary, Transformer};

/// What a corpus conversion did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CorpusSummary {
    pub documents: usize,
    pub segments: usize,
    pub tokens: usize,
    /// Files that could not be converted.
    pub skipped: Vec<PathBuf>,
}

pub struct Corpus {
    src: PathBuf,
    dst: PathBuf,
    persons: PathBuf,
    metadata: PathBuf,
    audio: PathBuf,
    config: Config,
}

impl Corpus {
    pub fn new(
        src: PathBuf,
        dst: PathBuf,
        persons: PathBuf,
        metadata: PathBuf,
        audio: PathBuf,
        config: Config,
    ) -> Self {
        Self {
            src,
            dst,
            persons,
            metadata,
            audio,
            config,
        }
    }

    /// list documents in source folder, sorted.
    fn document_paths(&self) -> Result<Vec<PathBuf>, Error> {
        let pattern = self.src.join("*.xml");
        let mut paths = glob::glob(&pattern.to_string_lossy())?
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();
        Ok(paths)
    }

    /// Document name of a TEI file: the file stem up to the first `_`.
    fn document_name(path: &Path) -> Result<String, Error> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.split('_').next())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .ok_or_else(|| Error::Custom(format!("no document name in {:?}", path)))
    }

    fn convert(
        transformer: &Transformer,
        path: &Path,
        state: &mut CorpusState,
        converted: &HashSet<String>,
    ) -> Result<(String, DocumentSummary, DocumentBatch), Error> {
        let name = Self::document_name(path)?;
        if converted.contains(&name) {
            return Err(Error::Custom(format!(
                "document {name} has already been converted from another file"
            )));
        }
        info!("working on document {name} ({:?})", path);
        let xml = std::fs::read_to_string(path)?;
        let mut batch = DocumentBatch::default();
        let summary = transformer.document(&name, &xml, state, &mut batch)?;
        Ok((name, summary, batch))
    }

    /// Removes what a failed document may have left in the media folder.
    ///
    /// Only the partial file is touched: the media of a converted document is never removed.
    fn discard_media(transformer: &Transformer, path: &Path) {
        if let Ok(name) = Self::document_name(path) {
            let media = transformer.partial_media_path(&name);
            if media.exists() {
                if let Err(e) = std::fs::remove_file(&media) {
                    error!("could not remove {:?}: {}", media, e);
                }
            }
        }
    }
}

impl Pipeline<CorpusSummary> for Corpus {
    fn run(&self) -> Result<CorpusSummary, Error> {
        let media = self.dst.join("media");
        if !media.exists() {
            warn!("destination folder {:?} does not exist, creating it", media);
            std::fs::create_dir_all(&media)?;
        }

        let mut persons = PersonRegistry::from_path(&self.persons)?;
        info!("{} speakers in {:?}", persons.len(), self.persons);
        let table = DocumentTable::from_path(
            &self.metadata,
            &self.config.skip_document_columns,
            &mut persons,
        )?;
        info!("{} documents in {:?}", table.len(), self.metadata);

        let delimiter = self.config.delimiter_byte();
        let mut tables = TableFiles::create(&self.dst, table.columns(), delimiter)?;

        let audio = WavFolder::new(&self.audio, &self.config.clip_extension);
        let transformer = Transformer::new(&self.config, &audio, &table, &media);
        let mut state = CorpusState::new(
            transformer.clock(),
            Schema::new(self.config.corpus.clone()),
            persons,
        );

        let mut summary = CorpusSummary::default();
        let mut converted = HashSet::new();
        for path in self.document_paths()? {
            let snapshot = state.snapshot();
            match Self::convert(&transformer, &path, &mut state, &converted) {
                Ok((name, document, batch)) => {
                    batch.commit(&mut tables)?;
                    converted.insert(name);
                    summary.documents += 1;
                    summary.segments += document.segments;
                    summary.tokens += document.tokens;
                }
                Err(e) => {
                    error!("skipping {:?}: {}", path, e);
                    state.restore(&snapshot);
                    Self::discard_media(&transformer, &path);
                    summary.skipped.push(path);
                }
            }
        }
        tables.flush()?;

        debug!(
            "{} forms, {} lemmas, {} speakers",
            state.forms.len(),
            state.lemmas.len(),
            state.persons.len()
        );
        write_interner(
            &self.dst,
            "token_form",
            ["form_id", "form"],
            &state.forms,
            delimiter,
        )?;
        write_interner(
            &self.dst,
            "token_lemma",
            ["lemma_id", "lemma"],
            &state.lemmas,
            delimiter,
        )?;
        write_speakers(&self.dst, &state.persons, delimiter)?;
        state.schema.write(&self.dst.join("meta.json"))?;

        info!(
            "converted {} documents ({} skipped)",
            summary.documents,
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_names() {
        assert_eq!(
            Corpus::document_name(Path::new("/tmp/d1007_transcription.xml")).unwrap(),
            "d1007"
        );
        assert_eq!(Corpus::document_name(Path::new("d1.xml")).unwrap(), "d1");
        assert!(Corpus::document_name(Path::new("_x.xml")).is_err());
    }

    #[test]
    fn sorted_paths() {
        let src = tempfile::tempdir().unwrap();
        for name in ["b.xml", "a.xml", "c.txt"] {
            std::fs::write(src.path().join(name), "").unwrap();
        }
        let corpus = Corpus::new(
            src.path().to_path_buf(),
            PathBuf::new(),
            PathBuf::new(),
            PathBuf::new(),
            PathBuf::new(),
            Config::default(),
        );
        let paths = corpus.document_paths().unwrap();
        let names: Vec<_> = paths.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }
}
