//! pocket-sim: play demo matches from the command line.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pocket_engine::game::{DEMO_DECK_A, DEMO_DECK_B};
use pocket_engine::recording::JsonLinesCollector;
use pocket_engine::{
    Catalog, EnergyType, GameOver, GameResult, Match, MatchConfig, PlayerId, PlayerSpec,
    PolicyKind, Result,
};

#[derive(Parser)]
#[command(name = "pocket-sim")]
#[command(about = "Simulate pocket card game matches", long_about = None)]
struct Cli {
    /// Root seed; game N uses seed + N
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Play the first seat yourself
    #[arg(long)]
    human: bool,

    /// Let the second seat use the lookahead planner
    #[arg(long)]
    planner: bool,

    /// Planner search depth
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Append per-turn JSON lines to this file
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Load the card catalog from a JSON file instead of the built-in one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json(&std::fs::read_to_string(path)?)?,
        None => Catalog::standard(),
    };
    let catalog = Arc::new(catalog);

    let record = match &cli.record {
        Some(path) => Some(File::options().create(true).append(true).open(path)?),
        None => None,
    };

    for game in 0..cli.games {
        let config = MatchConfig::new().with_seed(cli.seed.wrapping_add(u64::from(game)));

        let first = if cli.human {
            PolicyKind::Human
        } else {
            PolicyKind::Random
        };
        let second = if cli.planner {
            PolicyKind::Planner { depth: cli.depth }
        } else {
            PolicyKind::Random
        };

        let mut builder = Match::builder(Arc::clone(&catalog))
            .config(config)
            .player(PlayerSpec::new("alice", DEMO_DECK_A, [EnergyType::Psychic]).with_policy(first))
            .player(PlayerSpec::new("bob", DEMO_DECK_B, [EnergyType::Psychic]).with_policy(second));
        if let Some(file) = &record {
            builder = builder.sink(JsonLinesCollector::new(BufWriter::new(file.try_clone()?)));
        }

        let mut game_match = builder.build()?;
        let over = game_match.play()?;
        println!("game {}: {}", game + 1, summary(&game_match, &over));
    }
    Ok(())
}

fn summary(game: &Match, over: &GameOver) -> String {
    let state = game.state();
    let score = format!(
        "{}-{}",
        state.player(PlayerId::FIRST).points,
        state.player(PlayerId::SECOND).points
    );
    match over.result {
        GameResult::Winner(player) => format!(
            "{} wins ({:?}) on turn {}, score {}",
            state.player(player).name,
            over.cause,
            over.turn,
            score
        ),
        GameResult::Draw => format!("draw ({:?}) on turn {}, score {}", over.cause, over.turn, score),
    }
}
