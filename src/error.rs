//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Xml(roxmltree::Error),
    Wav(hound::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    /// A required column is absent from a metadata table.
    MissingColumn {
        file: String,
        column: String,
    },
    /// The document has no row in the metadata table.
    UnknownDocument(String),
    /// An apportioned token start went past the audio cursor.
    AudioUnderflow {
        document: String,
        start: f64,
        cursor: f64,
    },
    /// Concatenated media length differs from the accumulated audio cursor.
    DurationMismatch {
        document: String,
        expected: i64,
        measured: i64,
    },
    AudioFormat(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {e}"),
            Error::Csv(e) => write!(f, "csv: {e}"),
            Error::Serde(e) => write!(f, "json: {e}"),
            Error::Xml(e) => write!(f, "xml: {e}"),
            Error::Wav(e) => write!(f, "wav: {e}"),
            Error::Glob(e) => write!(f, "glob: {e}"),
            Error::GlobPattern(e) => write!(f, "glob pattern: {e}"),
            Error::MissingColumn { file, column } => {
                write!(f, "{file}: missing required column {column:?}")
            }
            Error::UnknownDocument(doc) => write!(f, "no metadata row for document {doc:?}"),
            Error::AudioUnderflow {
                document,
                start,
                cursor,
            } => write!(
                f,
                "{document}: token audio start {start:.3}s exceeds audio cursor {cursor:.3}s"
            ),
            Error::DurationMismatch {
                document,
                expected,
                measured,
            } => write!(
                f,
                "{document}: concatenated audio lasts {measured}s, cursor accumulated {expected}s"
            ),
            Error::AudioFormat(msg) => write!(f, "audio format: {msg}"),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Error {
        Error::Xml(e)
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Error {
        Error::Wav(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
