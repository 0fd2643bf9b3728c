//! Track generator — a constrained random walk that fills the track with notes and rests.

use log::{debug, warn};
use rand::Rng;

use crate::scale::{Pitch, PitchSet};

use super::beat::Beat;
use super::error::GenerationError;
use super::event::{NoteEvent, Track};
use super::params::TrackParameters;

/// Lower bound on consecutive rejected draws before generation gives up.
pub const MIN_RETRY_CAP: usize = 1024;

/// Rejected draws allowed in a row for a pitch set of `pitch_count` pitches.
pub fn retry_cap(pitch_count: usize) -> usize {
    MIN_RETRY_CAP.max(pitch_count.saturating_mul(64))
}

/// Generate a track by drawing pitches from `pitch_set` until the next note
/// and rest would reach the end of the track.
///
/// Each accepted draw emits a note of 1..=`max_note_duration_beats` beats
/// followed by a rest of 0..=`max_rest_beats` beats. A draw that would repeat
/// the previous pitch more than `max_repeat_pitch` times is discarded without
/// advancing time. If [`retry_cap`] draws in a row are discarded the pitch set
/// cannot satisfy the repeat limit and generation fails.
pub fn generate_track<R: Rng + ?Sized>(
    pitch_set: &PitchSet,
    params: &TrackParameters,
    rng: &mut R,
) -> Result<Track, GenerationError> {
    params.validate()?;
    let pitches = pitch_set.to_vec();
    if pitches.is_empty() {
        return Err(GenerationError::EmptyPitchSet);
    }

    let limit = params.duration_beats();
    let cap = retry_cap(pitches.len());

    let mut track = Track::new();
    let mut current: u64 = 0;
    let mut previous: Option<Pitch> = None;
    let mut repeats: u32 = 0;
    let mut rejected: usize = 0;

    loop {
        let pitch = pitches[rng.gen_range(0..pitches.len())];
        if previous == Some(pitch) {
            repeats = repeats.saturating_add(1);
        } else {
            repeats = 0;
        }
        if repeats > params.max_repeat_pitch {
            rejected += 1;
            if rejected > cap {
                warn!("repeat limit unsatisfiable: {rejected} draws of pitch {pitch} in a row");
                return Err(GenerationError::RetryCapExceeded {
                    pitch,
                    attempts: rejected,
                });
            }
            continue;
        }
        rejected = 0;

        let note = u64::from(rng.gen_range(1..=params.max_note_duration_beats));
        let rest = u64::from(rng.gen_range(0..=params.max_rest_beats));
        let end = current + note + rest;
        if end as f64 >= limit {
            break;
        }

        track.push(NoteEvent::note(
            pitch,
            Beat::from_beats(current),
            Beat::from_beats(note),
            params.velocity,
        ));
        track.push(NoteEvent::rest(
            pitch,
            Beat::from_beats(current + note),
            Beat::from_beats(rest),
        ));
        current = end;
        previous = Some(pitch);
    }

    debug!(
        "generated {} notes spanning {current} of {limit} beats",
        track.notes().count()
    );
    Ok(track)
}
