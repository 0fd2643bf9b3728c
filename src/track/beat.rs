//! Musical time as integer ticks.
//!
//! Generated durations are whole beats, but the MIDI writer works in ticks,
//! so time is stored at [`TICKS_PER_BEAT`] resolution from the start and
//! never passes through floating point.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Ticks per quarter note (beat). Also the PPQN written to MIDI headers.
pub const TICKS_PER_BEAT: u64 = 960;

/// A point in or span of musical time, in ticks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Beat {
    ticks: u64,
}

impl Beat {
    pub const ZERO: Beat = Beat { ticks: 0 };

    pub fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    /// Create a `Beat` from whole beats.
    pub fn from_beats(beats: u64) -> Self {
        Self {
            ticks: beats * TICKS_PER_BEAT,
        }
    }

    pub fn ticks(self) -> u64 {
        self.ticks
    }

    /// Whole beats, rounding down.
    pub fn whole_beats(self) -> u64 {
        self.ticks / TICKS_PER_BEAT
    }

    pub fn as_beats_f64(self) -> f64 {
        self.ticks as f64 / TICKS_PER_BEAT as f64
    }

    /// Wall-clock length of this span at the given tempo.
    pub fn as_seconds(self, bpm: f64) -> f64 {
        self.as_beats_f64() * 60.0 / bpm
    }
}

impl Ord for Beat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl PartialOrd for Beat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Beat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks + rhs.ticks,
        }
    }
}

impl Sub for Beat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(rhs.ticks),
        }
    }
}

impl fmt::Display for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks % TICKS_PER_BEAT == 0 {
            write!(f, "{}", self.whole_beats())
        } else {
            write!(f, "{:.3}", self.as_beats_f64())
        }
    }
}
