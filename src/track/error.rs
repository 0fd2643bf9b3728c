//! Error types for track parameters and generation.

use std::fmt;

use crate::scale::{Pitch, ScaleError};

/// A parameter that makes generation meaningless. Never clamped.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    NonPositiveTempo(f64),
    /// Microseconds per beat must fit the 24-bit MIDI tempo field.
    TempoOutOfRange(f64),
    NonPositiveDuration(f64),
    /// Track length in beats is infinite or too long to address in ticks.
    DurationTooLong(f64),
    ZeroMaxNoteDuration,
    OriginOutOfRange(Pitch),
    InvalidScale(ScaleError),
    /// Audible notes need a velocity in 1..=127.
    InvalidVelocity(u8),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NonPositiveTempo(bpm) => write!(f, "tempo must be positive, got {bpm}"),
            ParamError::TempoOutOfRange(bpm) => {
                write!(f, "tempo {bpm} BPM cannot be written to a MIDI file")
            }
            ParamError::DurationTooLong(beats) => {
                write!(f, "track of {beats} beats is too long")
            }
            ParamError::NonPositiveDuration(secs) => {
                write!(f, "track duration must be positive, got {secs}")
            }
            ParamError::ZeroMaxNoteDuration => {
                write!(f, "max note duration must be at least 1 beat")
            }
            ParamError::OriginOutOfRange(pitch) => write!(
                f,
                "origin pitch {pitch} is outside {}..={}",
                crate::scale::MIN_PITCH,
                crate::scale::MAX_PITCH
            ),
            ParamError::InvalidScale(e) => write!(f, "invalid scale: {e}"),
            ParamError::InvalidVelocity(v) => write!(f, "velocity must be 1..=127, got {v}"),
        }
    }
}

impl std::error::Error for ParamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamError::InvalidScale(e) => Some(e),
            _ => None,
        }
    }
}

/// Generation could not produce a track.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    InvalidParameters(ParamError),
    /// There is nothing to draw from.
    EmptyPitchSet,
    /// Too many consecutive draws repeated `pitch` past the repeat limit.
    RetryCapExceeded { pitch: Pitch, attempts: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidParameters(e) => write!(f, "{e}"),
            GenerationError::EmptyPitchSet => write!(f, "pitch set is empty"),
            GenerationError::RetryCapExceeded { pitch, attempts } => write!(
                f,
                "gave up after {attempts} draws repeating pitch {pitch}; \
                 the scale has too few pitches for the repeat limit"
            ),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::InvalidParameters(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamError> for GenerationError {
    fn from(e: ParamError) -> Self {
        GenerationError::InvalidParameters(e)
    }
}
