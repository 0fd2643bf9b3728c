//! One generation request, end to end: resolve, validate, build, generate, write.

use std::fmt;
use std::path::PathBuf;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AppConfig;
use crate::error::Result;
use crate::midi::MidiWriter;
use crate::scale::{parse_origin, PitchSet, ScaleStore};
use crate::track::{generate_track, Beat, Track, TrackParameters};

/// Parameters as the user supplies them: key and scale by name.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Origin key name (`C#`, `Eb`) or pitch number.
    pub key: String,
    /// Name of a scale in the store.
    pub scale: String,
    pub track_duration_secs: f64,
    pub tempo_bpm: f64,
    pub max_repeat_pitch: u32,
    pub max_rest_beats: u32,
    pub max_note_duration_beats: u32,
    pub velocity: u8,
    pub output: PathBuf,
    /// None = draw a fresh seed from entropy.
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// A request carrying the config's defaults.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            key: config.key.clone(),
            scale: config.scale.clone(),
            track_duration_secs: config.track_duration_secs,
            tempo_bpm: config.tempo_bpm,
            max_repeat_pitch: config.max_repeat_pitch,
            max_rest_beats: config.max_rest_beats,
            max_note_duration_beats: config.max_note_duration_beats,
            velocity: config.velocity,
            output: config.output.clone(),
            seed: config.seed,
        }
    }

    /// Look up the key and scale and validate everything.
    pub fn resolve(&self, store: &ScaleStore) -> Result<TrackParameters> {
        let origin = parse_origin(&self.key)?;
        let scale = store.get(&self.scale)?;
        let params = TrackParameters {
            origin,
            scale,
            track_duration_secs: self.track_duration_secs,
            tempo_bpm: self.tempo_bpm,
            max_repeat_pitch: self.max_repeat_pitch,
            max_rest_beats: self.max_rest_beats,
            max_note_duration_beats: self.max_note_duration_beats,
            velocity: self.velocity,
        };
        params.validate()?;
        Ok(params)
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A generated track with everything that produced it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub params: TrackParameters,
    pub pitch_set: PitchSet,
    pub track: Track,
    /// The seed that reproduces this track.
    pub seed: u64,
}

/// What a written file contains.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub output: PathBuf,
    pub seed: u64,
    pub pitch_count: usize,
    pub note_count: usize,
    pub rest_count: usize,
    pub span: Beat,
    /// Wall-clock length of `span` at the request's tempo.
    pub span_secs: f64,
    pub duration_beats: f64,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "wrote {}", self.output.display())?;
        writeln!(
            f,
            "  {} notes, {} rests from {} pitches",
            self.note_count, self.rest_count, self.pitch_count
        )?;
        writeln!(
            f,
            "  span {} of {:.2} beats ({:.1} s)",
            self.span, self.duration_beats, self.span_secs
        )?;
        write!(f, "  seed {}", self.seed)
    }
}

/// Resolve the request against `store` and generate its track.
pub fn generate(request: &GenerationRequest, store: &ScaleStore) -> Result<Generated> {
    let params = request.resolve(store)?;
    let pitch_set = params.pitch_set()?;
    let seed = request.seed.unwrap_or_else(rand::random);
    info!(
        "generating {:.2} beats in {} from origin {} ({} pitches, seed {seed})",
        params.duration_beats(),
        params.scale.name(),
        params.origin,
        pitch_set.len()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let track = generate_track(&pitch_set, &params, &mut rng)?;
    Ok(Generated {
        params,
        pitch_set,
        track,
        seed,
    })
}

/// Generate the request's track and write it to `request.output`.
pub fn generate_file(
    request: &GenerationRequest,
    store: &ScaleStore,
    writer: &MidiWriter,
) -> Result<GenerationSummary> {
    let generated = generate(request, store)?;
    writer.write(&generated.track, generated.params.tempo_bpm, &request.output)?;

    let summary = GenerationSummary {
        output: request.output.clone(),
        seed: generated.seed,
        pitch_count: generated.pitch_set.len(),
        note_count: generated.track.notes().count(),
        rest_count: generated.track.rests().count(),
        span: generated.track.end(),
        span_secs: generated.track.end().as_seconds(generated.params.tempo_bpm),
        duration_beats: generated.params.duration_beats(),
    };
    info!(
        "wrote {} notes to {}",
        summary.note_count,
        summary.output.display()
    );
    Ok(summary)
}
