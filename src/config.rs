//! User defaults loaded from ~/.frequencybot/config.yaml.
//!
//! Every field is optional in the file; anything missing falls back to the
//! stock value. Command-line flags override whatever is loaded here.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::midi::{MidiWriter, RestEncoding};
use crate::scale::default_store_path;
use crate::track::FULL_VELOCITY;

/// Failure to read or parse the config file.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "config {}: {source}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "config {} is malformed: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { .. } => None,
        }
    }
}

/// Generation defaults and output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin key name or pitch number.
    pub key: String,
    /// Name of a scale in the store.
    pub scale: String,
    pub track_duration_secs: f64,
    pub tempo_bpm: f64,
    pub max_repeat_pitch: u32,
    pub max_rest_beats: u32,
    pub max_note_duration_beats: u32,
    pub output: PathBuf,
    /// Scale store location. None = ~/.frequencybot/scales.yaml.
    pub scales_path: Option<PathBuf>,
    /// Fixed RNG seed. None = fresh entropy per run.
    pub seed: Option<u64>,
    pub velocity: u8,
    /// MIDI channel, 0-15.
    pub channel: u8,
    pub track_name: String,
    pub rest_encoding: RestEncoding,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key: "C".to_string(),
            scale: "major".to_string(),
            track_duration_secs: 120.0,
            tempo_bpm: 120.0,
            max_repeat_pitch: 3,
            max_rest_beats: 3,
            max_note_duration_beats: 8,
            output: PathBuf::from("output.mid"),
            scales_path: None,
            seed: None,
            velocity: FULL_VELOCITY,
            channel: 0,
            track_name: "Sample Track".to_string(),
            rest_encoding: RestEncoding::SilentNote,
        }
    }
}

impl AppConfig {
    /// Load from the standard path. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Where the scale store lives.
    pub fn scales_path(&self) -> PathBuf {
        self.scales_path.clone().unwrap_or_else(default_store_path)
    }

    /// A MIDI writer with this config's output settings.
    pub fn writer(&self) -> MidiWriter {
        MidiWriter {
            track_name: self.track_name.clone(),
            channel: self.channel,
            rest_encoding: self.rest_encoding,
        }
    }
}

/// Default path for the config file.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".frequencybot");
    path.push("config.yaml");
    path
}
