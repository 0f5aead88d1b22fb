//! # tei2tables
//!
//! Converts TEI transcriptions with aligned audio clips into corpus tables
//! (documents, segments, tokens, incidents, search vectors, interned forms and lemmas,
//! speakers) plus a JSON schema descriptor and one concatenated audio file per document.
//!
//! ## Getting started
//!
//! ```sh
//! tei2tables 1.0.0
//! TEI corpus to tables conversion tool.
//!
//! USAGE:
//!     tei2tables <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     convert    Convert a folder of TEI documents
//!     help       Prints this message or the help of the given subcommand(s)
//! ```
//!
//! `RUST_LOG=info` reports progress per document.
use structopt::StructOpt;
use tei2tables::config::Config;
use tei2tables::error::Error;
use tei2tables::pipeline::pipeline::Pipeline;
use tei2tables::pipeline::Corpus;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Tei2Tables::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Tei2Tables::Convert(c) => {
            let config = match &c.config {
                Some(path) => Config::from_path(path)?,
                None => Config::default(),
            };
            let p = Corpus::new(c.docs, c.dst, c.persons, c.metadata, c.audio, config);
            let summary = p.run()?;
            for path in &summary.skipped {
                warn!("skipped {:?}", path);
            }
        }
    };
    Ok(())
}
