//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --games 20 --seed 7 --max-plies 120 --verbose`
//!
//! Log output honors `RUST_LOG`; `--verbose` raises the default to `debug`.

use tracing_subscriber::EnvFilter;

use mailbox_chess::chess_errors::{ChessError, ChessResult};
use mailbox_chess::engines::engine_one_ply::OnePlyEngine;
use mailbox_chess::engines::engine_random::RandomEngine;
use mailbox_chess::engines::engine_trait::Engine;
use mailbox_chess::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

struct Args {
    games: u16,
    seed: u64,
    max_plies: u16,
    verbose: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> ChessResult<T> {
    let value = value.unwrap_or_default();
    value.parse::<T>().map_err(|_| ChessError::InvalidOption {
        name: flag.to_owned(),
        value,
    })
}

fn parse_args() -> ChessResult<Args> {
    let mut args = Args {
        games: 10,
        seed: 1234,
        max_plies: 200,
        verbose: false,
    };

    let mut argv = std::env::args().skip(1);
    while let Some(flag) = argv.next() {
        match flag.as_str() {
            "--games" => args.games = parse_value(&flag, argv.next())?,
            "--seed" => args.seed = parse_value(&flag, argv.next())?,
            "--max-plies" => args.max_plies = parse_value(&flag, argv.next())?,
            "--verbose" | "-v" => args.verbose = true,
            _ => {
                return Err(ChessError::InvalidOption {
                    name: flag.clone(),
                    value: String::new(),
                })
            }
        }
    }
    Ok(args)
}

fn main() -> ChessResult<()> {
    let args = parse_args()?;

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Swap either factory to try other engines or selector settings.
    let player1 = |_seed: u64| Box::new(OnePlyEngine::new()) as Box<dyn Engine>;
    let player2 = |seed: u64| Box::new(RandomEngine::new(seed)) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                ..MatchConfig::default()
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
