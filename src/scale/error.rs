//! Error types for scale definitions, origin keys, and the pitch builder.

use std::fmt;

/// An invalid scale pattern, scale name, or origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// The step pattern has no steps.
    EmptyPattern,
    /// A step is zero or negative.
    NonPositiveStep { index: usize, step: i64 },
    /// A step could not be read as an integer.
    InvalidStep(String),
    /// Scale names must contain at least one non-whitespace character.
    EmptyName,
    /// The origin pitch lies outside the playable range.
    OriginOutOfRange(i64),
    /// The text does not name one of the twelve origin keys.
    UnknownKey(String),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleError::EmptyPattern => write!(f, "scale pattern has no steps"),
            ScaleError::NonPositiveStep { index, step } => {
                write!(f, "step {} is {step}; steps must be positive", index + 1)
            }
            ScaleError::InvalidStep(token) => write!(f, "'{token}' is not a whole number"),
            ScaleError::EmptyName => write!(f, "scale name is empty"),
            ScaleError::OriginOutOfRange(pitch) => write!(
                f,
                "origin pitch {pitch} is outside {}..={}",
                super::MIN_PITCH,
                super::MAX_PITCH
            ),
            ScaleError::UnknownKey(text) => write!(f, "unknown key '{text}'"),
        }
    }
}

impl std::error::Error for ScaleError {}
