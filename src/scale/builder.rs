//! Scale builder: enumerates every in-range pitch a step pattern reaches from an origin.

use std::collections::BTreeSet;

use log::debug;

use super::definition::validate_pattern;
use super::error::ScaleError;
use super::pitch::{in_range, Pitch, MAX_PITCH, MIN_PITCH};

/// The pitches a scale reaches from its origin, kept in ascending order.
///
/// Ordering keeps seeded generation reproducible; membership is all that
/// matters semantically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitchSet {
    pitches: BTreeSet<Pitch>,
}

impl PitchSet {
    pub fn contains(&self, pitch: Pitch) -> bool {
        self.pitches.contains(&pitch)
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Pitches in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Pitch> + '_ {
        self.pitches.iter().copied()
    }

    pub fn lowest(&self) -> Option<Pitch> {
        self.pitches.first().copied()
    }

    pub fn highest(&self) -> Option<Pitch> {
        self.pitches.last().copied()
    }

    /// Pitches in ascending order, for indexed sampling.
    pub fn to_vec(&self) -> Vec<Pitch> {
        self.iter().collect()
    }
}

impl FromIterator<Pitch> for PitchSet {
    fn from_iter<I: IntoIterator<Item = Pitch>>(iter: I) -> Self {
        Self {
            pitches: iter.into_iter().collect(),
        }
    }
}

/// Build the pitch set for `pattern` anchored on `origin`.
///
/// The ascending pass walks the pattern in order, the descending pass walks
/// it reversed; both wrap around the pattern and stop at the first pitch
/// outside `MIN_PITCH..=MAX_PITCH`. The pattern itself is left untouched.
pub fn build_pitch_set(origin: Pitch, pattern: &[u32]) -> Result<PitchSet, ScaleError> {
    validate_pattern(pattern)?;
    if !in_range(i64::from(origin)) {
        return Err(ScaleError::OriginOutOfRange(i64::from(origin)));
    }

    let mut pitches = BTreeSet::from([origin]);

    let mut current = i64::from(origin);
    for &step in pattern.iter().cycle() {
        current += i64::from(step);
        if current > i64::from(MAX_PITCH) {
            break;
        }
        pitches.insert(current as Pitch);
    }

    let mut current = i64::from(origin);
    for &step in pattern.iter().rev().cycle() {
        current -= i64::from(step);
        if current < i64::from(MIN_PITCH) {
            break;
        }
        pitches.insert(current as Pitch);
    }

    debug!(
        "pitch set for origin {origin} with pattern {pattern:?}: {} pitches",
        pitches.len()
    );
    Ok(PitchSet { pitches })
}
