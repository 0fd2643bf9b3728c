//! Crate-level error joining every subsystem's failure.

use std::fmt;

use crate::config::ConfigError;
use crate::midi::MidiError;
use crate::scale::{ScaleError, StoreError};
use crate::track::{GenerationError, ParamError};

/// Any failure a generation request or store mutation can report.
#[derive(Debug)]
pub enum Error {
    Scale(ScaleError),
    Store(StoreError),
    Params(ParamError),
    Generation(GenerationError),
    Midi(MidiError),
    Config(ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Scale(e) => write!(f, "{e}"),
            Error::Store(e) => write!(f, "{e}"),
            Error::Params(e) => write!(f, "invalid parameter: {e}"),
            Error::Generation(e) => write!(f, "generation failed: {e}"),
            Error::Midi(e) => write!(f, "{e}"),
            Error::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Scale(e) => Some(e),
            Error::Store(e) => Some(e),
            Error::Params(e) => Some(e),
            Error::Generation(e) => Some(e),
            Error::Midi(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

impl From<ScaleError> for Error {
    fn from(e: ScaleError) -> Self {
        Error::Scale(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<ParamError> for Error {
    fn from(e: ParamError) -> Self {
        Error::Params(e)
    }
}

impl From<GenerationError> for Error {
    fn from(e: GenerationError) -> Self {
        Error::Generation(e)
    }
}

impl From<MidiError> for Error {
    fn from(e: MidiError) -> Self {
        Error::Midi(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}
