//! Track parameters and their validation.

use crate::scale::{build_pitch_set, in_range, Pitch, PitchSet, ScaleDefinition};

use super::beat::TICKS_PER_BEAT;
use super::error::ParamError;
use super::event::FULL_VELOCITY;

/// Longest track, in beats. Keeps every tick position (track end plus one
/// maximal note and rest) well inside `u64`.
pub const MAX_TRACK_BEATS: f64 = (u64::MAX / TICKS_PER_BEAT / 4) as f64;

/// Everything one generation request needs besides randomness.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackParameters {
    pub origin: Pitch,
    pub scale: ScaleDefinition,
    pub track_duration_secs: f64,
    pub tempo_bpm: f64,
    /// How many times a pitch may repeat after its first occurrence.
    pub max_repeat_pitch: u32,
    pub max_rest_beats: u32,
    pub max_note_duration_beats: u32,
    /// Velocity of audible notes.
    pub velocity: u8,
}

impl TrackParameters {
    /// Parameters with the stock limits: two minutes at 120 BPM, at most
    /// three repeats, rests up to 3 beats, notes up to 8 beats.
    pub fn new(origin: Pitch, scale: ScaleDefinition) -> Self {
        Self {
            origin,
            scale,
            track_duration_secs: 120.0,
            tempo_bpm: 120.0,
            max_repeat_pitch: 3,
            max_rest_beats: 3,
            max_note_duration_beats: 8,
            velocity: FULL_VELOCITY,
        }
    }

    /// Track length in beats: `seconds * bpm / 60`.
    pub fn duration_beats(&self) -> f64 {
        self.track_duration_secs * self.tempo_bpm / 60.0
    }

    /// Reject anything that would make generation meaningless.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.tempo_bpm.is_finite() && self.tempo_bpm > 0.0) {
            return Err(ParamError::NonPositiveTempo(self.tempo_bpm));
        }
        if crate::midi::tempo_micros(self.tempo_bpm).is_err() {
            return Err(ParamError::TempoOutOfRange(self.tempo_bpm));
        }
        if !(self.track_duration_secs.is_finite() && self.track_duration_secs > 0.0) {
            return Err(ParamError::NonPositiveDuration(self.track_duration_secs));
        }
        let beats = self.duration_beats();
        if !(beats.is_finite() && beats <= MAX_TRACK_BEATS) {
            return Err(ParamError::DurationTooLong(beats));
        }
        if self.max_note_duration_beats == 0 {
            return Err(ParamError::ZeroMaxNoteDuration);
        }
        if !in_range(i64::from(self.origin)) {
            return Err(ParamError::OriginOutOfRange(self.origin));
        }
        crate::scale::validate_pattern(self.scale.steps()).map_err(ParamError::InvalidScale)?;
        if self.velocity == 0 || self.velocity > 127 {
            return Err(ParamError::InvalidVelocity(self.velocity));
        }
        Ok(())
    }

    /// The pitch set for this origin and scale.
    pub fn pitch_set(&self) -> Result<PitchSet, ParamError> {
        build_pitch_set(self.origin, self.scale.steps()).map_err(ParamError::InvalidScale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn major() -> ScaleDefinition {
        ScaleDefinition::parse("major", "2, 2, 1, 2, 2, 2, 1").unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let params = TrackParameters::new(60, major());
        assert!(params.validate().is_ok());
        assert_approx_eq!(params.duration_beats(), 240.0);
    }

    #[test]
    fn duration_beats_formula() {
        let mut params = TrackParameters::new(60, major());
        params.track_duration_secs = 4.0;
        params.tempo_bpm = 60.0;
        assert_approx_eq!(params.duration_beats(), 4.0);
        params.track_duration_secs = 10.0;
        params.tempo_bpm = 90.0;
        assert_approx_eq!(params.duration_beats(), 15.0);
    }

    #[test]
    fn rejects_bad_tempo() {
        let mut params = TrackParameters::new(60, major());
        params.tempo_bpm = 0.0;
        assert_eq!(params.validate(), Err(ParamError::NonPositiveTempo(0.0)));
        params.tempo_bpm = -10.0;
        assert!(params.validate().is_err());
        params.tempo_bpm = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_tempo_outside_midi_range() {
        let mut params = TrackParameters::new(60, major());
        params.tempo_bpm = 3.0;
        assert_eq!(params.validate(), Err(ParamError::TempoOutOfRange(3.0)));
        params.tempo_bpm = 4.0;
        assert!(params.validate().is_ok());
        params.tempo_bpm = 1e9;
        params.track_duration_secs = 1e-6;
        assert_eq!(params.validate(), Err(ParamError::TempoOutOfRange(1e9)));
    }

    #[test]
    fn rejects_duration_whose_ticks_overflow() {
        let mut params = TrackParameters::new(60, major());
        params.tempo_bpm = 60.0;
        params.track_duration_secs = 1e18;
        assert_eq!(params.validate(), Err(ParamError::DurationTooLong(1e18)));

        // Each factor is finite, the product is not.
        params.track_duration_secs = f64::MAX;
        params.tempo_bpm = 120.0;
        assert_eq!(
            params.validate(),
            Err(ParamError::DurationTooLong(f64::INFINITY))
        );
    }

    #[test]
    fn accepts_long_track_below_bound() {
        let mut params = TrackParameters::new(60, major());
        params.tempo_bpm = 60.0;
        params.track_duration_secs = 1e15;
        assert!(params.duration_beats() < MAX_TRACK_BEATS);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_bad_duration() {
        let mut params = TrackParameters::new(60, major());
        params.track_duration_secs = 0.0;
        assert_eq!(params.validate(), Err(ParamError::NonPositiveDuration(0.0)));
        params.track_duration_secs = f64::INFINITY;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_note_duration() {
        let mut params = TrackParameters::new(60, major());
        params.max_note_duration_beats = 0;
        assert_eq!(params.validate(), Err(ParamError::ZeroMaxNoteDuration));
    }

    #[test]
    fn rejects_origin_out_of_range() {
        let params = TrackParameters::new(109, major());
        assert_eq!(params.validate(), Err(ParamError::OriginOutOfRange(109)));
        let params = TrackParameters::new(35, major());
        assert_eq!(params.validate(), Err(ParamError::OriginOutOfRange(35)));
    }

    #[test]
    fn rejects_silent_or_overflowing_velocity() {
        let mut params = TrackParameters::new(60, major());
        params.velocity = 0;
        assert_eq!(params.validate(), Err(ParamError::InvalidVelocity(0)));
        params.velocity = 128;
        assert_eq!(params.validate(), Err(ParamError::InvalidVelocity(128)));
    }

    #[test]
    fn zero_repeat_and_rest_limits_are_valid() {
        let mut params = TrackParameters::new(60, major());
        params.max_repeat_pitch = 0;
        params.max_rest_beats = 0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn pitch_set_matches_builder() {
        let params = TrackParameters::new(62, major());
        assert_eq!(
            params.pitch_set().unwrap(),
            build_pitch_set(62, &[2, 2, 1, 2, 2, 2, 1]).unwrap()
        );
    }
}
