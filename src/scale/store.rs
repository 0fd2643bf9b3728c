//! Scale store — named step patterns, persisted as YAML in ~/.frequencybot/scales.yaml.
//!
//! The file is a plain mapping from scale name to step list:
//!
//! ```yaml
//! major: [2, 2, 1, 2, 2, 2, 1]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::definition::{validate_pattern, ScaleDefinition};
use super::error::ScaleError;

/// Failure to read, write, or query the scale store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    Io { path: PathBuf, source: io::Error },
    /// The store file is not a name → steps mapping.
    Format { path: PathBuf, message: String },
    /// A stored scale has an invalid pattern.
    Invalid { name: String, source: ScaleError },
    /// No scale with this name exists.
    UnknownScale(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "scale store {}: {source}", path.display())
            }
            StoreError::Format { path, message } => {
                write!(f, "scale store {} is malformed: {message}", path.display())
            }
            StoreError::Invalid { name, source } => write!(f, "scale '{name}': {source}"),
            StoreError::UnknownScale(name) => write!(f, "no scale named '{name}'"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Named scale definitions available to generation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleStore {
    scales: BTreeMap<String, Vec<u32>>,
}

impl ScaleStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding major, minor, and mixolydian.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for def in ScaleDefinition::defaults() {
            store.add(def);
        }
        store
    }

    /// Insert a scale, replacing any scale with the same name.
    /// Returns the replaced definition.
    pub fn add(&mut self, definition: ScaleDefinition) -> Option<ScaleDefinition> {
        let name = definition.name().to_string();
        let previous = self.scales.insert(name.clone(), definition.steps().to_vec());
        previous.map(|steps| ScaleDefinition::new(name, steps))?.ok()
    }

    /// Remove a scale by name.
    pub fn remove(&mut self, name: &str) -> Result<ScaleDefinition, StoreError> {
        let steps = self
            .scales
            .remove(name)
            .ok_or_else(|| StoreError::UnknownScale(name.to_string()))?;
        ScaleDefinition::new(name, steps).map_err(|source| StoreError::Invalid {
            name: name.to_string(),
            source,
        })
    }

    /// Look up a scale by name.
    pub fn get(&self, name: &str) -> Result<ScaleDefinition, StoreError> {
        let steps = self
            .scales
            .get(name)
            .ok_or_else(|| StoreError::UnknownScale(name.to_string()))?;
        ScaleDefinition::new(name, steps.clone()).map_err(|source| StoreError::Invalid {
            name: name.to_string(),
            source,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scales.contains_key(name)
    }

    /// Scale names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }

    /// All scales as `(name, steps)` pairs, sorted by name.
    pub fn list(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.scales
            .iter()
            .map(|(name, steps)| (name.as_str(), steps.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Check every stored pattern, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (name, steps) in &self.scales {
            validate_pattern(steps).map_err(|source| StoreError::Invalid {
                name: name.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Default path for the scale store.
pub fn default_store_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".frequencybot");
    path.push("scales.yaml");
    path
}

/// Load the scale store from a YAML file.
///
/// A missing file is seeded with the default scales, which are written back
/// so the file exists afterwards.
pub fn load_store(path: &Path) -> Result<ScaleStore, StoreError> {
    if !path.exists() {
        info!("seeding scale store at {}", path.display());
        let store = ScaleStore::with_defaults();
        save_store(path, &store)?;
        return Ok(store);
    }
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let store: ScaleStore = serde_yaml::from_str(&content).map_err(|e| StoreError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    store.validate()?;
    debug!("loaded {} scales from {}", store.len(), path.display());
    Ok(store)
}

/// Save the scale store to a YAML file, creating parent directories as needed.
///
/// The new content goes to a temporary file beside `path` and is renamed over
/// it, so a failed save leaves the previous file intact.
pub fn save_store(path: &Path, store: &ScaleStore) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let yaml = serde_yaml::to_string(store).map_err(|e| StoreError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(yaml.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    debug!("saved {} scales to {}", store.len(), path.display());
    Ok(())
}
