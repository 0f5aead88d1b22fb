//! TEI corpus to tables conversion.
//!
//! The [pipeline::Corpus] pipeline loads the corpus-wide registries,
//! runs every document through [transform::Transformer] and writes the tables with [io::writer].
pub mod audio;
pub mod config;
pub mod error;
pub mod intern;
pub mod io;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod transform;
