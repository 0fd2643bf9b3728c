//! Error types for MIDI encoding and file output.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to encode a track or write the MIDI file.
#[derive(Debug)]
pub enum MidiError {
    /// The tempo cannot be stored as 24-bit microseconds per beat.
    TempoOutOfRange(f64),
    /// MIDI channels are 0..=15.
    InvalidChannel(u8),
    /// Pitch or velocity above 127.
    InvalidNote { pitch: u8, velocity: u8 },
    /// Gap between consecutive events does not fit a 28-bit delta.
    DeltaTooLarge(u64),
    /// Serializing the in-memory file failed.
    Encode(io::Error),
    /// Writing the destination file failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::TempoOutOfRange(bpm) => {
                write!(f, "tempo {bpm} BPM cannot be written to a MIDI file")
            }
            MidiError::InvalidChannel(ch) => write!(f, "MIDI channel {ch} is not in 0..=15"),
            MidiError::InvalidNote { pitch, velocity } => {
                write!(f, "note {pitch} velocity {velocity} exceeds 127")
            }
            MidiError::DeltaTooLarge(ticks) => {
                write!(f, "{ticks} ticks between events exceeds the MIDI maximum")
            }
            MidiError::Encode(e) => write!(f, "failed to encode MIDI: {e}"),
            MidiError::Io { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for MidiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MidiError::Encode(e) => Some(e),
            MidiError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
