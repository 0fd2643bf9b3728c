//! frequencybot — generate a random MIDI track from a scale.
//!
//! Settings come from ~/.frequencybot/config.yaml and can be overridden per
//! run with flags. Scales live in ~/.frequencybot/scales.yaml and are managed
//! with the `scales` subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::debug;

use frequencybot::config::AppConfig;
use frequencybot::midi::RestEncoding;
use frequencybot::request::{generate_file, GenerationRequest};
use frequencybot::scale::{format_pattern, load_store, save_store, OriginKey, ScaleDefinition};
use frequencybot::Result;

#[derive(Debug, Parser)]
#[command(
    name = "frequencybot",
    version,
    about = "Generate a single-track MIDI file of random notes from a scale"
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.frequencybot/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Scale store file (default: ~/.frequencybot/scales.yaml)
    #[arg(long, global = true)]
    scales: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a MIDI file
    Generate(GenerateArgs),
    /// List, add, or remove scales
    Scales {
        #[command(subcommand)]
        action: ScalesCommand,
    },
    /// List the origin keys and their pitches
    Keys,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Origin key (A, A#, B, C, ... G#) or pitch number 36-108
    #[arg(short, long)]
    key: Option<String>,

    /// Scale name from the store
    #[arg(short, long)]
    scale: Option<String>,

    /// Track duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Tempo in beats per minute
    #[arg(short, long)]
    tempo: Option<f64>,

    /// Times the same pitch may repeat in a row after its first occurrence
    #[arg(long)]
    max_repeats: Option<u32>,

    /// Longest rest between notes, in beats
    #[arg(long)]
    max_rest: Option<u32>,

    /// Longest note, in beats
    #[arg(long)]
    max_note: Option<u32>,

    /// Output .mid path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// RNG seed (same seed and settings give the same file)
    #[arg(long)]
    seed: Option<u64>,

    /// How rests are written to the file
    #[arg(long, value_enum)]
    rest_encoding: Option<RestEncoding>,
}

impl GenerateArgs {
    /// Overlay the flags that were given onto `config`.
    fn apply(self, config: &mut AppConfig) {
        if let Some(key) = self.key {
            config.key = key;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(duration) = self.duration {
            config.track_duration_secs = duration;
        }
        if let Some(tempo) = self.tempo {
            config.tempo_bpm = tempo;
        }
        if let Some(n) = self.max_repeats {
            config.max_repeat_pitch = n;
        }
        if let Some(n) = self.max_rest {
            config.max_rest_beats = n;
        }
        if let Some(n) = self.max_note {
            config.max_note_duration_beats = n;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(encoding) = self.rest_encoding {
            config.rest_encoding = encoding;
        }
    }
}

#[derive(Debug, Subcommand)]
enum ScalesCommand {
    /// List stored scales
    List,
    /// Add or replace a scale, e.g. `scales add blues 3,2,1,1,3,2`
    Add {
        name: String,
        /// Semitone steps, comma or space separated
        #[arg(required = true, num_args = 1..)]
        steps: Vec<String>,
    },
    /// Remove a scale
    Remove { name: String },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(path) = cli.scales {
        config.scales_path = Some(path);
    }
    let scales_path = config.scales_path();
    debug!("scale store: {}", scales_path.display());

    match cli.command {
        Command::Generate(args) => {
            let store = load_store(&scales_path)?;
            args.apply(&mut config);
            let request = GenerationRequest::from_config(&config);
            let summary = generate_file(&request, &store, &config.writer())?;
            println!("{summary}");
        }
        Command::Scales { action } => {
            let mut store = load_store(&scales_path)?;
            match action {
                ScalesCommand::List => {
                    for (name, steps) in store.list() {
                        println!("{name:<16} {}", format_pattern(steps));
                    }
                }
                ScalesCommand::Add { name, steps } => {
                    let text = steps
                        .iter()
                        .flat_map(|s| s.split(','))
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(",");
                    let definition = ScaleDefinition::parse(name, &text)?;
                    let replaced = store.add(definition.clone());
                    save_store(&scales_path, &store)?;
                    match replaced {
                        Some(old) => println!("replaced {old} with {definition}"),
                        None => println!("saved {definition}"),
                    }
                }
                ScalesCommand::Remove { name } => {
                    let removed = store.remove(&name)?;
                    save_store(&scales_path, &store)?;
                    println!("removed {removed}");
                }
            }
        }
        Command::Keys => {
            for key in OriginKey::ALL {
                println!("{:<3} {}", key.name(), key.pitch());
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
