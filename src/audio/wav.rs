//! WAV clips stored as `<root>/<document>/<clip>.<ext>`.
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};

use crate::error::Error;

use super::AudioSource;

#[derive(Debug, Clone)]
pub struct WavFolder {
    root: PathBuf,
    extension: String,
}

impl WavFolder {
    pub fn new(root: &Path, extension: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            extension: extension.to_string(),
        }
    }

    pub fn clip_path(&self, document: &str, clip: &str) -> PathBuf {
        let mut path = self.root.join(document);
        path.push(format!("{clip}.{}", self.extension));
        path
    }

    fn open(path: &Path) -> Result<WavReader<BufReader<File>>, Error> {
        Ok(WavReader::open(path)?)
    }

    /// Duration of an opened reader, in seconds.
    fn reader_duration<R: std::io::Read>(reader: &WavReader<R>) -> f64 {
        f64::from(reader.duration()) / f64::from(reader.spec().sample_rate)
    }

    /// Measured duration of any WAV file.
    pub fn measure(path: &Path) -> Result<f64, Error> {
        Ok(Self::reader_duration(&Self::open(path)?))
    }

    /// Copy every sample of `reader` into `writer`, keeping the sample format.
    fn append<W>(
        reader: &mut WavReader<BufReader<File>>,
        writer: &mut WavWriter<W>,
    ) -> Result<(), Error>
    where
        W: std::io::Write + std::io::Seek,
    {
        match reader.spec().sample_format {
            SampleFormat::Float => {
                for sample in reader.samples::<f32>() {
                    writer.write_sample(sample?)?;
                }
            }
            SampleFormat::Int => {
                for sample in reader.samples::<i32>() {
                    writer.write_sample(sample?)?;
                }
            }
        }
        Ok(())
    }

    fn check_spec(expected: &WavSpec, got: &WavSpec, clip: &Path) -> Result<(), Error> {
        if expected != got {
            return Err(Error::AudioFormat(format!(
                "{clip:?} is {got:?}, previous clips are {expected:?}"
            )));
        }
        Ok(())
    }
}

impl AudioSource for WavFolder {
    fn duration(&self, document: &str, clip: &str) -> Result<Option<f64>, Error> {
        let path = self.clip_path(document, clip);
        if !path.exists() {
            warn!("{document}: missing clip {path:?}");
            return Ok(None);
        }
        Ok(Some(Self::measure(&path)?))
    }

    fn concatenate(&self, document: &str, clips: &[String], dst: &Path) -> Result<f64, Error> {
        let Some((first, rest)) = clips.split_first() else {
            debug!("{document}: no clip to concatenate");
            return Ok(0.0);
        };

        let mut reader = Self::open(&self.clip_path(document, first))?;
        let spec = reader.spec();
        let mut writer = WavWriter::create(dst, spec)?;
        Self::append(&mut reader, &mut writer)?;

        for clip in rest {
            let path = self.clip_path(document, clip);
            let mut reader = Self::open(&path)?;
            Self::check_spec(&spec, &reader.spec(), &path)?;
            Self::append(&mut reader, &mut writer)?;
        }
        writer.finalize()?;

        let duration = Self::measure(dst)?;
        debug!("{document}: wrote {dst:?} ({duration:.3}s)");
        Ok(duration)
    }
}
