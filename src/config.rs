//! Resolved runtime configuration

use crate::game::daily_seed;
use crate::storage::{Storage, StorageError};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

const DATABASE_FILE: &str = "few-good-films.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the database
    pub data_dir: PathBuf,
    /// Seed to play instead of today's date
    pub seed_override: Option<String>,
}

impl Config {
    /// Fill in anything not given on the command line from OS defaults.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        seed_override: Option<String>,
    ) -> Result<Self, StorageError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Storage::data_dir()?,
        };
        Ok(Config {
            data_dir,
            seed_override,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// The seed to play at `now`.
    pub fn seed(&self, now: DateTime<Utc>) -> String {
        self.seed_override
            .clone()
            .unwrap_or_else(|| daily_seed(now))
    }
}
