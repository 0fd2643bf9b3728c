//! Scales — origin keys, named step patterns, the pitch-set builder, and the scale store.
//!
//! A scale is a cycle of semitone steps. Anchored on an origin pitch it
//! yields every pitch in `MIN_PITCH..=MAX_PITCH` reachable by walking the
//! cycle up and down; that [`PitchSet`] is what the track generator samples.

pub mod builder;
pub mod definition;
pub mod error;
pub mod pitch;
pub mod store;

pub use builder::{build_pitch_set, PitchSet};
pub use definition::{format_pattern, parse_pattern, validate_pattern, ScaleDefinition};
pub use error::ScaleError;
pub use pitch::{in_range, parse_origin, OriginKey, Pitch, MAX_PITCH, MIN_PITCH};
pub use store::{default_store_path, load_store, save_store, ScaleStore, StoreError};
