//! Delimited table file.
use std::{
    fs::File,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Serialize;

use crate::error::Error;

use super::WriterTrait;

/// Header row followed by one serialized record per [WriterTrait::write_single].
pub struct TableWriter<T> {
    path: PathBuf,
    inner: csv::Writer<File>,
    rows: u64,
    item: PhantomData<T>,
}

impl<T: Serialize> TableWriter<T> {
    /// Creates (or truncates) `<dst>/<name>.csv` and writes `header`.
    pub fn create<H, S>(dst: &Path, name: &str, header: H, delimiter: u8) -> Result<Self, Error>
    where
        H: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let path = dst.join(format!("{name}.csv"));
        let mut inner = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_path(&path)?;
        inner.write_record(header)?;
        debug!("created table {path:?}");

        Ok(Self {
            path,
            inner,
            rows: 0,
            item: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows written.
    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl<T: Serialize> WriterTrait for TableWriter<T> {
    type Item = T;

    fn write_single(&mut self, val: &T) -> Result<(), Error> {
        self.inner.serialize(val)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(self.inner.flush()?)
    }
}
