//! Few Good Films - a daily movie trivia board
//!
//! Name a movie. Clear the prompts it fits. New prompts take their place.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use few_good_films::catalog::catalog;
use few_good_films::config::Config;
use few_good_films::game::daily::is_date_seed;
use few_good_films::game::{DailyPrompts, GameSession, GuessResult, Replacement};
use few_good_films::movie::normalize::normalize;
use few_good_films::movie::MovieRecord;
use few_good_films::storage::{GameVersion, Storage, StorageError};
use std::path::PathBuf;
use tracing::{info, warn};

/// Times a guess is replayed when another session saved first
const SAVE_ATTEMPTS: u32 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily movie trivia board", long_about = None)]
struct Args {
    /// Directory for the saved-game database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Play this seed instead of today's UTC date
    #[arg(long, global = true)]
    seed: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the daily prompts as JSON
    Daily {
        /// Date to generate for (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show today's board, starting a game if needed
    Board,
    /// Guess a movie
    Guess {
        /// Movie id
        #[arg(long)]
        id: String,
        /// Title as the player sees it
        #[arg(long)]
        title: String,
        /// Movie metadata JSON file
        #[arg(long)]
        movie: PathBuf,
    },
    /// Delete today's saved game
    Reset,
    /// List saved days
    History,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::resolve(args.data_dir, args.seed)?;
    let seed = config.seed(Utc::now());

    match args.command {
        Command::Daily { date } => {
            let seed = date.unwrap_or(seed);
            if !is_date_seed(&seed) {
                bail!("'{}' is not a YYYY-MM-DD date", seed);
            }
            let daily = DailyPrompts::generate(catalog(), &seed);
            println!("{}", serde_json::to_string_pretty(&daily)?);
        }
        Command::Board => {
            let storage = Storage::open(&config)?;
            let (session, _) = load_or_start(&storage, &seed)?;
            print_board(&session);
        }
        Command::Guess { id, title, movie } => {
            let raw = std::fs::read_to_string(&movie)
                .with_context(|| format!("reading {}", movie.display()))?;
            let payload: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", movie.display()))?;
            let record = normalize(&payload);

            let storage = Storage::open(&config)?;
            let (session, result, replacements) =
                play_guess(&storage, &seed, &id, &title, &record)?;
            match result {
                GuessResult::Accepted {
                    points,
                    cleared,
                    guesses_left,
                } => {
                    println!("+{} ({} guesses left)", points, guesses_left);
                    for label in &cleared {
                        println!("  cleared: {}", label);
                    }
                    for replacement in &replacements {
                        let label = catalog()
                            .get(&replacement.prompt_id)
                            .map(|p| p.label())
                            .unwrap_or(&replacement.prompt_id);
                        println!("  new prompt: {}", label);
                    }
                }
                GuessResult::AlreadyGuessed => println!("Already guessed {}", title),
                GuessResult::GameOver => println!("No guesses left today"),
            }
            print_board(&session);
        }
        Command::Reset => {
            let storage = Storage::open(&config)?;
            if storage.delete_game(&seed)? {
                println!("Deleted game for {}", seed);
            } else {
                println!("No saved game for {}", seed);
            }
        }
        Command::History => {
            let storage = Storage::open(&config)?;
            for day in storage.list_days()? {
                println!(
                    "{}  score {:>3}  guesses left {:>2}  {}",
                    day.seed,
                    day.score,
                    day.guesses_left,
                    day.phase.as_str()
                );
            }
        }
    }

    Ok(())
}

fn load_or_start(storage: &Storage, seed: &str) -> Result<(GameSession, GameVersion)> {
    if let Some(snapshot) = storage.load_game(seed)? {
        let version = GameVersion::from(&snapshot);
        return Ok((GameSession::restore(catalog(), snapshot), version));
    }

    let session = GameSession::new(catalog(), seed);
    let snapshot = session.snapshot();
    match storage.save_game(&snapshot, None) {
        Ok(()) => {
            info!(seed, "started new game");
            Ok((session, GameVersion::from(&snapshot)))
        }
        Err(StorageError::Conflict { .. }) => {
            let snapshot = storage
                .load_game(seed)?
                .with_context(|| format!("game for {} was deleted while starting", seed))?;
            let version = GameVersion::from(&snapshot);
            Ok((GameSession::restore(catalog(), snapshot), version))
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply a guess and its replacements to the latest saved game.
///
/// If another session saved in between, the guess is replayed on top of
/// that save so every replacement draws from the next reroll number.
fn play_guess(
    storage: &Storage,
    seed: &str,
    movie_id: &str,
    title: &str,
    record: &MovieRecord,
) -> Result<(GameSession, GuessResult, Vec<Replacement>)> {
    for attempt in 1..=SAVE_ATTEMPTS {
        let (mut session, base) = load_or_start(storage, seed)?;
        let result = session.apply_guess(movie_id, title, record);
        if !matches!(result, GuessResult::Accepted { .. }) {
            return Ok((session, result, Vec::new()));
        }

        let replacements = session.settle(catalog());
        match storage.save_game(&session.snapshot(), Some(base)) {
            Ok(()) => return Ok((session, result, replacements)),
            Err(StorageError::Conflict { key }) => {
                warn!(key = %key, attempt, "game changed while guessing, replaying guess");
            }
            Err(e) => return Err(e.into()),
        }
    }
    bail!("game for {} kept changing; guess not saved", seed)
}

fn print_board(session: &GameSession) {
    println!(
        "{}  score {}  guesses left {}",
        session.daily_seed(),
        session.score(),
        session.guesses_left()
    );
    for (i, cell) in session.board().cells().iter().enumerate() {
        let mark = match cell.filled_by() {
            Some(by) => format!(" [{}]", by.title),
            None => String::new(),
        };
        println!("{:>2}. {}{}", i + 1, cell.prompt().label(), mark);
    }
}
