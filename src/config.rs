/*! Conversion settings.

Every field has a default matching the ArchiMob TEI export, so that a
config file only needs to list what differs. Loaded from JSON with
[Config::from_path].
!*/
use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::error::Error;

/// How segment audio is distributed over its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Every token shares the frame range of its segment clip.
    #[default]
    Clip,
    /// Tokens receive a share of the clip proportional to their length.
    Token,
}

/// Filename fix for clips of a given document folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClipCorrection {
    pub document: String,
    pub from: String,
    pub to: String,
}

/// Corpus description copied in the schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorpusMeta {
    pub name: String,
    pub author: String,
    pub url: String,
    pub date: String,
    pub version: u32,
    pub corpus_description: String,
}

impl Default for CorpusMeta {
    fn default() -> Self {
        Self {
            name: "ArchiMob Release 2 (2019) (Version 1.0.0)".to_string(),
            author: "Scherrer, Y., Samardzic, T., & Glaser, E.".to_string(),
            url: "https://doi.org/10.48656/496p-3w34".to_string(),
            date: "2023".to_string(),
            version: 1,
            corpus_description: "The ArchiMob corpus represents German linguistic varieties \
spoken within the territory of Switzerland."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sentence_tag: String,
    pub token_tag: String,
    pub lemma_attribute: String,
    pub xpos_attribute: String,
    pub speaker_prefix: String,
    pub frame_rate: f64,
    pub delimiter: char,
    pub skip_document_columns: Vec<String>,
    pub granularity: Granularity,
    pub clip_corrections: Vec<ClipCorrection>,
    pub clip_extension: String,
    pub corpus: CorpusMeta,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentence_tag: "u".to_string(),
            token_tag: "w".to_string(),
            lemma_attribute: "normalised".to_string(),
            xpos_attribute: "tag".to_string(),
            speaker_prefix: "person_db#".to_string(),
            frame_rate: 25.0,
            delimiter: '\t',
            skip_document_columns: vec![
                "Year of birth".to_string(),
                "Sex".to_string(),
                "Profession".to_string(),
            ],
            granularity: Granularity::default(),
            clip_corrections: Vec::new(),
            clip_extension: "wav".to_string(),
            corpus: CorpusMeta::default(),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        if !config.delimiter.is_ascii() {
            return Err(Error::Custom(format!(
                "delimiter must be a single ascii character, got {:?}",
                config.delimiter
            )));
        }
        if !(config.frame_rate.is_finite() && config.frame_rate > 0.0) {
            return Err(Error::Custom(format!(
                "frame rate must be a positive number, got {}",
                config.frame_rate
            )));
        }
        Ok(config)
    }

    /// Delimiter as the byte the csv writers expect.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b'\t'
        }
    }
}
