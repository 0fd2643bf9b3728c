//! Tracks — musical time, note events, parameters, and the constrained random-walk generator.

pub mod beat;
pub mod error;
pub mod event;
pub mod generator;
pub mod params;

pub use beat::{Beat, TICKS_PER_BEAT};
pub use error::{GenerationError, ParamError};
pub use event::{NoteEvent, Track, FULL_VELOCITY};
pub use generator::{generate_track, retry_cap, MIN_RETRY_CAP};
pub use params::{TrackParameters, MAX_TRACK_BEATS};
