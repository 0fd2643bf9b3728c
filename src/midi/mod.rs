//! MIDI output — turns a generated [`Track`](crate::track::Track) into a Standard MIDI File.

pub mod error;
pub mod writer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::MidiError;
pub use writer::{tempo_micros, MidiWriter};

/// How rest events reach the file.
///
/// Audible note-on/note-off timing is identical under both encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RestEncoding {
    /// Each rest is a velocity-0 note spanning the silence.
    #[default]
    SilentNote,
    /// Rests are omitted; silence is the gap before the next note.
    Gap,
}

impl fmt::Display for RestEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestEncoding::SilentNote => f.write_str("silent-note"),
            RestEncoding::Gap => f.write_str("gap"),
        }
    }
}

impl FromStr for RestEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "silent-note" => Ok(RestEncoding::SilentNote),
            "gap" => Ok(RestEncoding::Gap),
            other => Err(format!("unknown rest encoding '{other}'")),
        }
    }
}
