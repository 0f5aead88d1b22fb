//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "tei2tables", about = "TEI corpus to tables conversion tool.")]
/// Holds every command that is callable by the `tei2tables` command.
pub enum Tei2Tables {
    #[structopt(about = "Convert a folder of TEI documents")]
    Convert(Convert),
}

#[derive(Debug, StructOpt)]
/// Convert command and parameters.
pub struct Convert {
    #[structopt(parse(from_os_str), help = "TEI documents location")]
    pub docs: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of tables and media")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "persons",
        short = "p",
        help = "person registry (XML)"
    )]
    pub persons: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "metadata",
        short = "m",
        help = "document metadata table (TSV)"
    )]
    pub metadata: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "audio",
        short = "a",
        help = "audio clips location, one folder per document"
    )]
    pub audio: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "config",
        short = "c",
        help = "optional JSON configuration"
    )]
    pub config: Option<PathBuf>,
}
