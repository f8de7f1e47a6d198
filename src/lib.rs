//! Few Good Films - a daily movie trivia board
//!
//! Sixteen prompts a day, the same for everyone. Name movies that satisfy them.

pub mod catalog;
pub mod config;
pub mod game;
pub mod movie;
pub mod storage;
