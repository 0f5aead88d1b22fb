//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait and the [Corpus] pipeline,
//! which converts a folder of TEI documents into tables.
mod corpus;
pub mod pipeline;

pub use corpus::{Corpus, CorpusSummary};
