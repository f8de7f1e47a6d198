//! One day's game: board, guesses, score, and the reroll counter

use super::board::{Board, Cell, FilledBy, Replacement};
use super::daily::DailyPrompts;
use super::sampler::Sampler;
use crate::catalog::Catalog;
use crate::movie::MovieRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Guesses a player gets per day
pub const MAX_GUESSES: u32 = 10;

/// Top-billed performers kept per log entry
const LOGGED_STARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "playing" => Some(Phase::Playing),
            "game_over" => Some(Phase::GameOver),
            _ => None,
        }
    }
}

/// One accepted guess, with the movie details shown in the guess history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub stars: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub box_office: Option<f64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Labels of the prompts this guess satisfied
    pub cleared: Vec<String>,
    pub points: u32,
    /// Unix timestamp (milliseconds)
    pub timestamp: i64,
}

impl LogEntry {
    fn new(movie_id: &str, title: &str, movie: &MovieRecord, cleared: Vec<String>) -> Self {
        LogEntry {
            movie_id: movie_id.to_string(),
            title: title.to_string(),
            year: movie.release_year(),
            runtime: movie.runtime,
            genres: movie.genres.clone().unwrap_or_default(),
            directors: movie.directors().map(|p| p.name.clone()).collect(),
            stars: movie
                .performers()
                .take(LOGGED_STARS)
                .map(|p| p.name.clone())
                .collect(),
            language: movie.original_language.clone(),
            budget: movie.budget_amount(),
            box_office: movie.box_office_amount(),
            poster_url: movie.poster_url.clone(),
            points: cleared.len() as u32,
            cleared,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Outcome of a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    Accepted {
        points: u32,
        cleared: Vec<String>,
        guesses_left: u32,
    },
    /// Movie already guessed today; no guess consumed
    AlreadyGuessed,
    /// No guesses left
    GameOver,
}

/// A cell as persisted: just enough to rehydrate through the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCell {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_by: Option<FilledBy>,
}

/// Serializable session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub daily_seed: String,
    pub reroll_count: u32,
    pub guesses_left: u32,
    pub score: u32,
    pub phase: Phase,
    pub board: Vec<StoredCell>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    daily_seed: String,
    reroll_count: u32,
    board: Board,
    guesses_left: u32,
    score: u32,
    phase: Phase,
    log: Vec<LogEntry>,
    guessed: HashSet<String>,
}

impl GameSession {
    /// Start a fresh game, generating the board locally.
    pub fn new(catalog: &Catalog, seed: &str) -> Self {
        Self::with_board(seed, Board::generate(catalog, seed))
    }

    /// Start a fresh game from a served daily board.
    pub fn from_daily(catalog: &Catalog, daily: &DailyPrompts) -> Self {
        Self::with_board(&daily.seed, Board::from_prompts(daily.hydrate(catalog)))
    }

    fn with_board(seed: &str, board: Board) -> Self {
        GameSession {
            daily_seed: seed.to_string(),
            reroll_count: 0,
            board,
            guesses_left: MAX_GUESSES,
            score: 0,
            phase: Phase::Playing,
            log: Vec::new(),
            guessed: HashSet::new(),
        }
    }

    pub fn daily_seed(&self) -> &str {
        &self.daily_seed
    }

    pub fn reroll_count(&self) -> u32 {
        self.reroll_count
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn guesses_left(&self) -> u32 {
        self.guesses_left
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Score `movie`, guessed as `title`, against every unfilled cell.
    pub fn apply_guess(&mut self, movie_id: &str, title: &str, movie: &MovieRecord) -> GuessResult {
        if self.guesses_left == 0 || self.is_over() {
            return GuessResult::GameOver;
        }
        if self.guessed.contains(movie_id) {
            return GuessResult::AlreadyGuessed;
        }

        let by = FilledBy {
            movie_id: movie_id.to_string(),
            title: title.to_string(),
            poster_url: movie.poster_url.clone(),
        };
        let marked = self.board.fill_matching(movie, title, &by);
        let cleared: Vec<String> = marked
            .iter()
            .map(|&i| self.board.cells()[i].prompt().label().to_string())
            .collect();
        let points = marked.len() as u32;

        self.score += points;
        self.guesses_left -= 1;
        self.guessed.insert(movie_id.to_string());
        self.log.push(LogEntry::new(movie_id, title, movie, cleared.clone()));
        if self.guesses_left == 0 {
            self.phase = Phase::GameOver;
        }

        info!(
            seed = %self.daily_seed,
            movie_id,
            points,
            guesses_left = self.guesses_left,
            "guess accepted"
        );
        GuessResult::Accepted {
            points,
            cleared,
            guesses_left: self.guesses_left,
        }
    }

    /// Replace the prompt at `index`, bumping the reroll counter.
    pub fn replace_cell(&mut self, catalog: &Catalog, index: usize) -> Option<Replacement> {
        let sampler = Sampler::new(catalog, &self.daily_seed);
        self.board.replace(index, &sampler, &mut self.reroll_count)
    }

    /// Replace every filled cell, one at a time in board order.
    pub fn settle(&mut self, catalog: &Catalog) -> Vec<Replacement> {
        let sampler = Sampler::new(catalog, &self.daily_seed);
        self.board
            .filled_indices()
            .into_iter()
            .filter_map(|i| self.board.replace(i, &sampler, &mut self.reroll_count))
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            daily_seed: self.daily_seed.clone(),
            reroll_count: self.reroll_count,
            guesses_left: self.guesses_left,
            score: self.score,
            phase: self.phase,
            board: self
                .board
                .cells()
                .iter()
                .map(|c| StoredCell {
                    id: c.prompt().id().to_string(),
                    label: c.prompt().label().to_string(),
                    filled_by: c.filled_by().cloned(),
                })
                .collect(),
            log: self.log.clone(),
        }
    }

    /// Rebuild a session, rehydrating prompts by id.
    pub fn restore(catalog: &Catalog, snapshot: SessionSnapshot) -> Self {
        let board = Board::from_cells(
            snapshot
                .board
                .into_iter()
                .map(|c| Cell::with_fill(catalog.hydrate(&c.id, Some(&c.label)), c.filled_by))
                .collect(),
        );
        let guessed = snapshot.log.iter().map(|e| e.movie_id.clone()).collect();
        GameSession {
            daily_seed: snapshot.daily_seed,
            reroll_count: snapshot.reroll_count,
            board,
            guesses_left: snapshot.guesses_left,
            score: snapshot.score,
            phase: snapshot.phase,
            log: snapshot.log,
            guessed,
        }
    }
}
