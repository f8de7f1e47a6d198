//! Game logic: seeded sampling, board generation, daily prompts, sessions

pub mod board;
pub mod daily;
pub mod sampler;
pub mod seed;
pub mod session;

pub use board::{Board, Cell, FilledBy, Replacement, BOARD_SIZE};
pub use daily::{daily_seed, day_key, DailyPrompts, PromptRef};
pub use sampler::{Draw, Sampler};
pub use session::{
    GameSession, GuessResult, LogEntry, Phase, SessionSnapshot, StoredCell, MAX_GUESSES,
};
