/*! Audio collaborators

The conversion only needs two things from audio: the duration of a clip and the
concatenation of a document's clips into a single media file.
Both go through the [AudioSource] trait, implemented over WAV folders by [WavFolder].
!*/
mod wav;

use std::path::Path;

use crate::error::Error;

pub use wav::WavFolder;

pub trait AudioSource {
    /// Duration (in seconds) of `clip` from the `document` folder.
    ///
    /// Returns `Ok(None)` when the clip file does not exist.
    fn duration(&self, document: &str, clip: &str) -> Result<Option<f64>, Error>;

    /// Concatenates `clips` (in order) into `dst`, returning the measured duration of `dst`.
    fn concatenate(&self, document: &str, clips: &[String], dst: &Path) -> Result<f64, Error>;
}
