/*! Audio apportionment

Each segment points to an audio clip. The first time a clip is met in a document, its
duration is measured and the audio cursor moves by it; later references reuse the frame
range computed the first time. Missing clips move the cursor by one frame only.

Tokens then get their frames from [Apportionment], either the whole clip range
([Granularity::Clip]) or a share proportional to their length ([Granularity::Token]).
!*/
use std::collections::HashMap;

use log::debug;

use crate::audio::AudioSource;
use crate::config::{ClipCorrection, Granularity};
use crate::error::Error;

use super::cursor::{CursorState, FrameClock, Span};

/// Rounding slack when comparing apportioned positions to the audio cursor.
const TOLERANCE: f64 = 1e-9;

/// Clip name of a segment `start` attribute (`media#d1007-T12` -> `d1007-T12`),
/// after the corrections registered for `document`.
pub fn clip_name(start: &str, document: &str, corrections: &[ClipCorrection]) -> String {
    let fragment = match start.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => start,
    };
    corrections
        .iter()
        .filter(|c| c.document == document)
        .fold(fragment.trim().to_string(), |name, c| {
            name.replace(&c.from, &c.to)
        })
}

/// Audio of a clip, as resolved the first time it was met.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAudio {
    pub clip: String,
    pub present: bool,
    /// Covered audio cursor positions, in seconds.
    pub start: f64,
    pub end: f64,
    pub frames: Span,
}

/// Clip audio of a segment, with the duration that was added to the cursor for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAudio {
    pub audio: ClipAudio,
    /// Measured duration, 0 for missing or already consumed clips.
    pub duration: f64,
}

/// Per-document clip bookkeeping.
#[derive(Debug, Default)]
pub struct DocumentAudio {
    cache: HashMap<String, ClipAudio>,
    processed: Vec<String>,
    padding: f64,
}

impl DocumentAudio {
    /// Resolves the audio of a segment whose clip is `clip`, advancing `cursors` on first use.
    pub fn resolve(
        &mut self,
        document: &str,
        clip: &str,
        source: &dyn AudioSource,
        cursors: &mut CursorState,
        clock: &FrameClock,
    ) -> Result<SegmentAudio, Error> {
        if let Some(audio) = self.cache.get(clip) {
            debug!("{document}: clip {clip} already consumed");
            return Ok(SegmentAudio {
                audio: audio.clone(),
                duration: 0.0,
            });
        }

        let (present, duration, (start, end)) = match source.duration(document, clip)? {
            Some(duration) => {
                self.processed.push(clip.to_string());
                (true, duration, cursors.advance_audio(duration))
            }
            None => {
                self.padding += clock.frame();
                (false, 0.0, cursors.advance_audio(clock.frame()))
            }
        };

        let audio = ClipAudio {
            clip: clip.to_string(),
            present,
            start,
            end,
            frames: clock.span(start, end),
        };
        debug!("{document}: clip {clip} {duration:.3}s -> {}", audio.frames);
        self.cache.insert(clip.to_string(), audio.clone());

        Ok(SegmentAudio { audio, duration })
    }

    /// Consumed clips, in encounter order.
    pub fn processed(&self) -> &[String] {
        &self.processed
    }

    /// Cursor time added for missing clips.
    pub fn padding(&self) -> f64 {
        self.padding
    }
}

/// Distributes a segment's audio over its tokens, in order.
#[derive(Debug)]
pub struct Apportionment<'a> {
    document: &'a str,
    granularity: Granularity,
    start: f64,
    ratio: f64,
    frames: Span,
    consumed: usize,
}

impl<'a> Apportionment<'a> {
    /// `chars` is the total form length of the segment's tokens.
    pub fn new(
        document: &'a str,
        granularity: Granularity,
        segment: &SegmentAudio,
        chars: usize,
    ) -> Self {
        let ratio = if chars > 0 {
            segment.duration / chars as f64
        } else {
            0.0
        };
        Self {
            document,
            granularity,
            start: segment.audio.start,
            ratio,
            frames: segment.audio.frames,
            consumed: 0,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Frames of the next token, `len` characters long.
    ///
    /// Errors if the token would start past `audio_cursor`.
    pub fn next(&mut self, len: usize, audio_cursor: f64, clock: &FrameClock) -> Result<Span, Error> {
        let start = self.start + self.consumed as f64 * self.ratio;
        self.consumed += len;

        if start > audio_cursor + TOLERANCE {
            return Err(Error::AudioUnderflow {
                document: self.document.to_string(),
                start,
                cursor: audio_cursor,
            });
        }

        match self.granularity {
            Granularity::Token if self.ratio > 0.0 => {
                let end = self.start + self.consumed as f64 * self.ratio;
                Ok(clock.span(start, end))
            }
            _ => Ok(self.frames),
        }
    }
}
