//! FrequencyBot — procedural single-track MIDI generation constrained by a scale.
//!
//! Data flows one way: a [`GenerationRequest`](request::GenerationRequest)
//! names an origin key and a scale from a [`ScaleStore`](scale::ScaleStore);
//! the scale builder turns them into a [`PitchSet`](scale::PitchSet); the
//! track generator walks that set to fill the requested duration; the
//! [`MidiWriter`](midi::MidiWriter) serializes the result.

pub mod config;
pub mod error;
pub mod midi;
pub mod request;
pub mod scale;
pub mod track;

pub use error::{Error, Result};
