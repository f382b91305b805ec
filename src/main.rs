use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_mcts::search::HeuristicEvaluator;
use chess_mcts::{Color, Difficulty, GameState, Mcts};
use clap::{Parser, ValueEnum};
use mcts_chess::{load_settings, save_settings, settings_path, Console};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play chess against a Monte-Carlo tree search engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Engine strength: easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Side the engine plays
    #[arg(long, value_enum)]
    color: Option<Side>,

    /// Iterations per engine move, overriding the difficulty
    #[arg(long)]
    iterations: Option<u32>,

    /// Seed for the engine's RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,

    /// Never consult the opening book
    #[arg(long, default_value_t = false)]
    no_book: bool,

    /// Bias selection with the static-evaluation predictor
    #[arg(long, default_value_t = false)]
    heuristic: bool,

    /// Settings file to read (and write with --save)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Store the effective settings for next time
    #[arg(long, default_value_t = false)]
    save: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let path = args.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path);

    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(side) = args.color {
        settings.engine_color = side.into();
    }
    if args.iterations.is_some() {
        settings.iterations = args.iterations;
    }
    if args.no_book {
        settings.use_book = false;
    }
    if args.save {
        save_settings(&path, &settings)?;
    }

    let mut config = settings.search_config();
    config.seed = args.seed;
    info!(
        "[MAIN] {} engine as {}, {} iterations per move",
        settings.difficulty, settings.engine_color, config.iterations
    );

    let mut engine = Mcts::new(config).context("invalid engine settings")?;
    if args.heuristic {
        engine = engine.with_evaluator(HeuristicEvaluator::default());
    }

    let game = match &args.fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("bad --fen {fen:?}"))?,
        None => GameState::new(),
    };

    let stdin = io::stdin();
    let mut console = Console::new(game, engine, settings.engine_color, stdin.lock(), io::stdout());
    match console.run()? {
        Some(outcome) => println!("Result: {}", outcome.result()),
        None => println!("Game abandoned at {}", console.game().fen()),
    }
    Ok(())
}
