//! Note events and the track that orders them.
//!
//! A rest is stored as a zero-velocity event at the pitch of the note it
//! follows, spanning the silence until the next note. The MIDI writer decides
//! whether to serialize rests or leave the gap empty.

use crate::scale::Pitch;

use super::beat::Beat;

/// Velocity for audible notes when none is configured.
pub const FULL_VELOCITY: u8 = 100;

/// A single note or rest on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub start: Beat,
    pub duration: Beat,
    /// 0 marks a rest.
    pub velocity: u8,
}

impl NoteEvent {
    /// An audible note.
    pub fn note(pitch: Pitch, start: Beat, duration: Beat, velocity: u8) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity,
        }
    }

    /// A rest, encoded as a silent note.
    pub fn rest(pitch: Pitch, start: Beat, duration: Beat) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity: 0,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.velocity == 0
    }

    pub fn end(&self) -> Beat {
        self.start + self.duration
    }
}

/// Events ordered by non-decreasing start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    events: Vec<NoteEvent>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Events must arrive in start order.
    pub fn push(&mut self, event: NoteEvent) {
        debug_assert!(
            self.events.last().map_or(true, |last| last.start <= event.start),
            "events must be pushed in start order"
        );
        self.events.push(event);
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteEvent> {
        self.events.iter()
    }

    /// Audible notes only.
    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().filter(|e| !e.is_rest())
    }

    pub fn rests(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().filter(|e| e.is_rest())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The time the last event finishes; zero for an empty track.
    pub fn end(&self) -> Beat {
        self.events
            .iter()
            .map(NoteEvent::end)
            .max()
            .unwrap_or(Beat::ZERO)
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a NoteEvent;
    type IntoIter = std::slice::Iter<'a, NoteEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
