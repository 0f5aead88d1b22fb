/*! Corpus cursors

Characters, tokens and audio time are addressed by cursors that only move forward
for the whole corpus. Every persisted position is a half-open [Span].

Character and id cursors start at 1, the audio cursor starts one frame in,
so that 0 never denotes a real position.
!*/
use std::fmt;

use serde::{Serialize, Serializer};

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Converts seconds into frame positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    rate: f64,
}

impl FrameClock {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Duration of a single frame, in seconds.
    pub fn frame(&self) -> f64 {
        1.0 / self.rate
    }

    /// Nearest frame of a position in seconds.
    pub fn to_frame(&self, seconds: f64) -> u64 {
        (seconds * self.rate).round().max(0.0) as u64
    }

    /// Frame span of `[start, end)` seconds. Never empty: a collapsed span is one frame wide.
    pub fn span(&self, start: f64, end: f64) -> Span {
        let start = self.to_frame(start);
        let end = self.to_frame(end).max(start + 1);
        Span::new(start, end)
    }
}

/// Positions saved when a document or segment opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub char: u64,
    pub audio: f64,
}

/// The corpus-wide cursors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    char_cursor: u64,
    audio_cursor: f64,
    token_id: u64,
    incident_id: u64,
    document_id: u64,
}

impl CursorState {
    pub fn new(clock: &FrameClock) -> Self {
        Self {
            char_cursor: 1,
            audio_cursor: clock.frame(),
            token_id: 1,
            incident_id: 1,
            document_id: 1,
        }
    }

    pub fn char_cursor(&self) -> u64 {
        self.char_cursor
    }

    pub fn audio_cursor(&self) -> f64 {
        self.audio_cursor
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            char: self.char_cursor,
            audio: self.audio_cursor,
        }
    }

    /// Character span of a token of `len` characters.
    ///
    /// The cursor moves by `max(len - 1, 1)` plus one separator position,
    /// so consecutive tokens are contiguous.
    pub fn advance_token(&mut self, len: usize) -> Span {
        let start = self.char_cursor;
        let len = len as u64;
        self.char_cursor += len.saturating_sub(1).max(1) + 1;
        Span::new(start, self.char_cursor)
    }

    /// Single character span of an incident.
    pub fn advance_incident(&mut self) -> Span {
        let start = self.char_cursor;
        self.char_cursor += 1;
        Span::new(start, self.char_cursor)
    }

    /// Move the audio cursor by `seconds`, returning the covered `(start, end)`.
    pub fn advance_audio(&mut self, seconds: f64) -> (f64, f64) {
        let start = self.audio_cursor;
        self.audio_cursor += seconds.max(0.0);
        (start, self.audio_cursor)
    }

    /// Closes a segment opened at `open`.
    ///
    /// Segments narrower than two positions are padded by two so that the
    /// stored range is never degenerate. The last position is excluded.
    pub fn close_segment(&mut self, open: &Checkpoint) -> Span {
        if self.char_cursor - open.char < 2 {
            self.char_cursor += 2;
        }
        Span::new(open.char, self.char_cursor - 1)
    }

    /// Closes a document opened at `open`.
    pub fn close_document(&self, open: &Checkpoint) -> Span {
        Span::new(open.char, self.char_cursor)
    }

    pub fn next_token_id(&mut self) -> u64 {
        let id = self.token_id;
        self.token_id += 1;
        id
    }

    pub fn next_incident_id(&mut self) -> u64 {
        let id = self.incident_id;
        self.incident_id += 1;
        id
    }

    pub fn next_document_id(&mut self) -> u64 {
        let id = self.document_id;
        self.document_id += 1;
        id
    }
}
