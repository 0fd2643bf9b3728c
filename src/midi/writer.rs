//! Standard MIDI File writer for generated tracks.
//!
//! Output is SMF format 0: one track holding a track name, a tempo, and a
//! note-on/note-off pair per event, all on a single channel. Beat ticks map
//! one-to-one onto MIDI ticks at [`TICKS_PER_BEAT`] PPQN.

use std::io::Write;
use std::path::Path;

use log::debug;
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use tempfile::NamedTempFile;

use crate::track::{Track, TICKS_PER_BEAT};

use super::error::MidiError;
use super::RestEncoding;

/// Largest value a 24-bit tempo field holds.
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// Largest value a 28-bit delta-time holds.
const MAX_DELTA: u64 = 0x0FFF_FFFF;

/// Microseconds per beat for `bpm`, as stored in a tempo meta event.
pub fn tempo_micros(bpm: f64) -> Result<u32, MidiError> {
    if !(bpm.is_finite() && bpm > 0.0) {
        return Err(MidiError::TempoOutOfRange(bpm));
    }
    let micros = (60_000_000.0 / bpm).round();
    if micros < 1.0 || micros > f64::from(MAX_TEMPO_MICROS) {
        return Err(MidiError::TempoOutOfRange(bpm));
    }
    Ok(micros as u32)
}

/// Serializes a [`Track`] as a single-track MIDI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiWriter {
    pub track_name: String,
    pub channel: u8,
    pub rest_encoding: RestEncoding,
}

impl Default for MidiWriter {
    fn default() -> Self {
        Self {
            track_name: "Sample Track".to_string(),
            channel: 0,
            rest_encoding: RestEncoding::default(),
        }
    }
}

impl MidiWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rest_encoding(mut self, rest_encoding: RestEncoding) -> Self {
        self.rest_encoding = rest_encoding;
        self
    }

    /// Build the in-memory MIDI file.
    pub fn to_smf(&self, track: &Track, tempo_bpm: f64) -> Result<Smf<'_>, MidiError> {
        if self.channel > 15 {
            return Err(MidiError::InvalidChannel(self.channel));
        }
        let channel = u4::new(self.channel);
        let tempo = tempo_micros(tempo_bpm)?;

        // (tick, sounding, kind): note-offs sort ahead of note-ons at the same
        // tick so back-to-back notes are never cut short.
        let mut timed: Vec<(u64, bool, TrackEventKind<'_>)> = Vec::with_capacity(track.len() * 2);
        for event in track {
            if event.pitch > 127 || event.velocity > 127 {
                return Err(MidiError::InvalidNote {
                    pitch: event.pitch,
                    velocity: event.velocity,
                });
            }
            if event.is_rest() && self.rest_encoding == RestEncoding::Gap {
                continue;
            }
            let key = u7::new(event.pitch);
            timed.push((
                event.start.ticks(),
                !event.is_rest(),
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn {
                        key,
                        vel: u7::new(event.velocity),
                    },
                },
            ));
            timed.push((
                event.end().ticks(),
                false,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key,
                        vel: u7::new(0),
                    },
                },
            ));
        }
        timed.sort_by_key(|&(tick, sounding, _)| (tick, sounding));

        let mut events = Vec::with_capacity(timed.len() + 3);
        events.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(self.track_name.as_bytes())),
        });
        events.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo))),
        });

        let mut last_tick = 0;
        for (tick, _, kind) in timed {
            let delta = tick - last_tick;
            if delta > MAX_DELTA {
                return Err(MidiError::DeltaTooLarge(delta));
            }
            events.push(TrackEvent {
                delta: u28::new(delta as u32),
                kind,
            });
            last_tick = tick;
        }
        events.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(TICKS_PER_BEAT as u16)),
        ));
        smf.tracks.push(events);
        Ok(smf)
    }

    /// Encode the track as MIDI file bytes.
    pub fn to_bytes(&self, track: &Track, tempo_bpm: f64) -> Result<Vec<u8>, MidiError> {
        let smf = self.to_smf(track, tempo_bpm)?;
        let mut buf = Vec::new();
        smf.write_std(&mut buf).map_err(MidiError::Encode)?;
        Ok(buf)
    }

    /// Write the track to `path`.
    ///
    /// The file is fully encoded first, written to a temporary file beside
    /// `path`, then renamed into place. On failure nothing exists at `path`
    /// that was not there before.
    pub fn write(&self, track: &Track, tempo_bpm: f64, path: &Path) -> Result<(), MidiError> {
        let bytes = self.to_bytes(track, tempo_bpm)?;
        let io_err = |source: std::io::Error| MidiError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{Beat, NoteEvent, FULL_VELOCITY};

    fn two_note_track() -> Track {
        let mut track = Track::new();
        track.push(NoteEvent::note(60, Beat::ZERO, Beat::from_beats(2), FULL_VELOCITY));
        track.push(NoteEvent::rest(60, Beat::from_beats(2), Beat::from_beats(1)));
        track.push(NoteEvent::note(60, Beat::from_beats(3), Beat::from_beats(1), FULL_VELOCITY));
        track.push(NoteEvent::rest(60, Beat::from_beats(4), Beat::ZERO));
        track
    }

    /// Absolute tick, key, velocity, and on/off for every note message.
    fn note_messages(smf: &Smf) -> Vec<(u64, u8, u8, bool)> {
        let mut tick = 0u64;
        let mut out = Vec::new();
        for event in &smf.tracks[0] {
            tick += u64::from(event.delta.as_int());
            if let TrackEventKind::Midi { message, .. } = &event.kind {
                match message {
                    MidiMessage::NoteOn { key, vel } => {
                        out.push((tick, key.as_int(), vel.as_int(), true))
                    }
                    MidiMessage::NoteOff { key, vel } => {
                        out.push((tick, key.as_int(), vel.as_int(), false))
                    }
                    _ => {}
                }
            }
        }
        out
    }

    #[test]
    fn tempo_conversion() {
        assert_eq!(tempo_micros(120.0).unwrap(), 500_000);
        assert_eq!(tempo_micros(60.0).unwrap(), 1_000_000);
        assert!(matches!(tempo_micros(0.0), Err(MidiError::TempoOutOfRange(_))));
        // 60e6 / 3 does not fit 24 bits.
        assert!(tempo_micros(3.0).is_err());
        assert!(tempo_micros(4.0).is_ok());
    }

    #[test]
    fn header_and_meta_events() {
        let writer = MidiWriter::new();
        let track = two_note_track();
        let smf = writer.to_smf(&track, 90.0).unwrap();
        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(
            smf.header.timing,
            Timing::Metrical(u15::new(TICKS_PER_BEAT as u16))
        );
        assert_eq!(smf.tracks.len(), 1);

        let events = &smf.tracks[0];
        assert_eq!(
            events[0].kind,
            TrackEventKind::Meta(MetaMessage::TrackName(&b"Sample Track"[..]))
        );
        assert_eq!(
            events[1].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(666_667)))
        );
        assert_eq!(
            events.last().unwrap().kind,
            TrackEventKind::Meta(MetaMessage::EndOfTrack)
        );
    }

    #[test]
    fn silent_note_rests_are_written() {
        let writer = MidiWriter::new();
        let smf = writer.to_smf(&two_note_track(), 120.0).unwrap();
        let msgs = note_messages(&smf);
        // Two notes and two rests, each an on/off pair.
        assert_eq!(msgs.len(), 8);
        let silent_ons = msgs.iter().filter(|m| m.3 && m.2 == 0).count();
        assert_eq!(silent_ons, 2);
    }

    #[test]
    fn gap_rests_are_dropped_with_same_audible_timing() {
        let track = two_note_track();
        let silent_writer = MidiWriter::new();
        let gap_writer = MidiWriter::new().with_rest_encoding(RestEncoding::Gap);
        let silent = silent_writer.to_smf(&track, 120.0).unwrap();
        let gap = gap_writer.to_smf(&track, 120.0).unwrap();

        let audible_ons = |smf: &Smf| -> Vec<(u64, u8)> {
            note_messages(smf)
                .into_iter()
                .filter(|m| m.3 && m.2 > 0)
                .map(|m| (m.0, m.1))
                .collect()
        };
        assert_eq!(audible_ons(&silent), audible_ons(&gap));
        assert_eq!(
            audible_ons(&gap),
            vec![(0, 60), (3 * TICKS_PER_BEAT, 60)]
        );

        let gap_msgs = note_messages(&gap);
        assert_eq!(gap_msgs.len(), 4);
        let offs: Vec<u64> = gap_msgs.iter().filter(|m| !m.3).map(|m| m.0).collect();
        assert_eq!(offs, vec![2 * TICKS_PER_BEAT, 4 * TICKS_PER_BEAT]);
    }

    #[test]
    fn note_off_precedes_note_on_at_same_tick() {
        let mut track = Track::new();
        track.push(NoteEvent::note(64, Beat::ZERO, Beat::from_beats(1), FULL_VELOCITY));
        track.push(NoteEvent::rest(64, Beat::from_beats(1), Beat::ZERO));
        track.push(NoteEvent::note(64, Beat::from_beats(1), Beat::from_beats(1), FULL_VELOCITY));
        track.push(NoteEvent::rest(64, Beat::from_beats(2), Beat::ZERO));

        let writer = MidiWriter::new();
        let smf = writer.to_smf(&track, 120.0).unwrap();
        let at_one_beat: Vec<_> = note_messages(&smf)
            .into_iter()
            .filter(|m| m.0 == TICKS_PER_BEAT)
            .collect();
        // The audible note-on comes last at the shared tick.
        let last = at_one_beat.last().unwrap();
        assert!(last.3);
        assert_eq!(last.2, FULL_VELOCITY);
    }

    #[test]
    fn rejects_bad_channel_and_notes() {
        let mut writer = MidiWriter::new();
        writer.channel = 16;
        assert!(matches!(
            writer.to_smf(&two_note_track(), 120.0),
            Err(MidiError::InvalidChannel(16))
        ));

        let mut track = Track::new();
        track.push(NoteEvent::note(60, Beat::ZERO, Beat::from_beats(1), 200));
        assert!(matches!(
            MidiWriter::new().to_smf(&track, 120.0),
            Err(MidiError::InvalidNote { velocity: 200, .. })
        ));
    }

    #[test]
    fn empty_track_is_still_a_valid_file() {
        let bytes = MidiWriter::new().to_bytes(&Track::new(), 120.0).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.tracks[0].len(), 3);
    }

    #[test]
    fn bytes_parse_back() {
        let track = two_note_track();
        let bytes = MidiWriter::new().to_bytes(&track, 120.0).unwrap();
        assert_eq!(&bytes[..4], b"MThd");
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(note_messages(&smf).len(), 8);
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mid");
        MidiWriter::new()
            .write(&two_note_track(), 120.0, &path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(Smf::parse(&bytes).is_ok());
        // Only the destination remains; the temporary file was renamed.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_failure_reports_path_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.mid");
        let err = MidiWriter::new()
            .write(&two_note_track(), 120.0, &path)
            .unwrap_err();
        match err {
            MidiError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn encoding_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mid");
        assert!(MidiWriter::new()
            .write(&two_note_track(), 0.5, &path)
            .is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
