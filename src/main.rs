//! # Liminal Main Entry Point
//!
//! Generates a world from a seed, plays a scripted move string or lets the
//! autoexplorer play, and prints the resulting board.

use clap::Parser;
use liminal::{
    AutoExplorer, GameError, GameEvent, GameResult, GenerationConfig, InputHandler, JsonSeedFile,
    PlayerInput, SeedStore, Session, TextDisplay, TurnOutcome, TurnRules,
};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments for Liminal.
#[derive(Parser, Debug)]
#[command(name = "liminal")]
#[command(about = "A seed-driven maze survival simulation")]
#[command(version)]
struct Args {
    /// World seed; falls back to the seed file, then to the default seed
    #[arg(short, long)]
    seed: Option<u32>,

    /// Keys to play (w/a/s/d or h/j/k/l to move, e to drink)
    #[arg(short, long)]
    moves: Option<String>,

    /// Let the autoexplorer play instead of a move script
    #[arg(long)]
    autoplay: bool,

    /// Upper bound on turns played by --autoplay
    #[arg(long, default_value_t = 2000)]
    max_turns: u64,

    /// Draw unseen cells too
    #[arg(long)]
    reveal: bool,

    /// Print the final snapshot as JSON instead of the board
    #[arg(long)]
    json: bool,

    /// JSON file with `generation` and `rules` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// File the seed is read from and written back to
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Contents of a `--config` file. Both sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    generation: GenerationConfig,
    rules: TurnRules,
}

fn main() -> GameResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Liminal v{}", liminal::VERSION);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConfigFile::default(),
    };

    let mut seed_store = args
        .seed_file
        .as_ref()
        .map(|path| JsonSeedFile::new(path.clone()));
    let stored_seed = match &seed_store {
        Some(store) => store.load()?,
        None => None,
    };
    let seed = args
        .seed
        .or(stored_seed)
        .unwrap_or(config.generation.seed);

    let generation = GenerationConfig {
        seed,
        ..config.generation
    };
    let mut session = Session::with_config(generation, config.rules)?;
    if let Some(store) = seed_store.as_mut() {
        store.remember(&session)?;
    }

    let mut display = TextDisplay {
        reveal_all: args.reveal,
        ..TextDisplay::new()
    };
    display.add_events(&[GameEvent::SessionStarted { seed }]);

    if args.autoplay {
        autoplay(&mut session, &mut display, args.max_turns)?;
    } else if let Some(moves) = &args.moves {
        let inputs = InputHandler::new().parse_script(moves);
        for input in inputs {
            play(&mut session, &mut display, input)?;
        }
    }

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", display.render(&snapshot));
    }

    info!(
        "Finished on turn {} with outcome {:?}",
        snapshot.turn, snapshot.outcome
    );
    Ok(())
}

/// Initializes env_logger, letting `RUST_LOG` override the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_config(path: &Path) -> GameResult<ConfigFile> {
    let json = fs::read_to_string(path)?;
    let config: ConfigFile = serde_json::from_str(&json)?;
    config.generation.validate()?;
    config.rules.validate()?;
    Ok(config)
}

fn play(session: &mut Session, display: &mut TextDisplay, input: PlayerInput) -> GameResult<()> {
    match session.handle_input(input)? {
        TurnOutcome::Ignored(reason) => debug!("{:?} ignored: {:?}", input, reason),
        TurnOutcome::Resolved(events) => display.add_events(&events),
    }
    Ok(())
}

fn autoplay(session: &mut Session, display: &mut TextDisplay, max_turns: u64) -> GameResult<()> {
    let explorer = AutoExplorer::new();

    while session.turn() < max_turns {
        let Some(input) = explorer.next_input(&session.snapshot()) else {
            break;
        };
        match session.handle_input(input)? {
            TurnOutcome::Ignored(reason) => {
                return Err(GameError::InvalidState(format!(
                    "Autoexplorer proposed {:?}, which was ignored: {:?}",
                    input, reason
                )));
            }
            TurnOutcome::Resolved(events) => display.add_events(&events),
        }
    }
    Ok(())
}
