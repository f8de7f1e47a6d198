//! Persistent storage using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - One saved game per day, keyed by `daily-game-<seed>`

use crate::config::Config;
use crate::game::{day_key, LogEntry, Phase, SessionSnapshot, StoredCell};
use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: meta and daily_games tables
/// - v2: daily_games.log_json for the guess log
const SCHEMA_VERSION: u32 = 2;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not determine data directory")]
    NoDataDirectory,
    #[error("database schema version {found} is newer than supported version {supported}")]
    FutureSchemaVersion { found: u32, supported: u32 },
    #[error("failed to create data directory: {0}")]
    CreateDirFailed(#[source] std::io::Error),
    #[error("migration from version {from} to {to} failed: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },
    #[error("could not encode or decode saved game: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("saved game {key} is unreadable: {reason}")]
    CorruptGame { key: String, reason: String },
    #[error("saved game {key} was changed by another session")]
    Conflict { key: String },
}

/// The state a saved game was in when it was loaded.
///
/// Every accepted guess lowers `guesses_left` and every replacement raises
/// `reroll_count`, so any save in between changes one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameVersion {
    pub reroll_count: u32,
    pub guesses_left: u32,
}

impl From<&SessionSnapshot> for GameVersion {
    fn from(snapshot: &SessionSnapshot) -> Self {
        GameVersion {
            reroll_count: snapshot.reroll_count,
            guesses_left: snapshot.guesses_left,
        }
    }
}

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub seed: String,
    pub score: u32,
    pub guesses_left: u32,
    pub phase: Phase,
    /// Unix timestamp (milliseconds) of the last save
    pub updated_at: i64,
}

/// The main storage handle for saved games.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database under the configured data directory.
    ///
    /// Default directories:
    /// - Linux: `$XDG_DATA_HOME/few-good-films/` or `~/.local/share/few-good-films/`
    /// - macOS: `~/Library/Application Support/few-good-films/`
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&config.data_dir).map_err(StorageError::CreateDirFailed)?;
        Self::open_at(&config.database_path())
    }

    /// Open or create the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        info!(path = %path.display(), "opened storage");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = Storage {
            conn: Connection::open_in_memory()?,
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "few-good-films")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Save the game for the snapshot's day.
    ///
    /// With `base` of `None` the day must not have a saved game yet. Otherwise
    /// the stored game must still be at `base`, the version it was loaded at.
    /// Either way a concurrent save shows up as [`StorageError::Conflict`]
    /// instead of being overwritten.
    pub fn save_game(
        &self,
        snapshot: &SessionSnapshot,
        base: Option<GameVersion>,
    ) -> Result<(), StorageError> {
        let key = day_key(&snapshot.daily_seed);
        let board_json = serde_json::to_string(&snapshot.board)?;
        let log_json = serde_json::to_string(&snapshot.log)?;

        let written = match base {
            None => self.conn.execute(
                "INSERT INTO daily_games
                    (day_key, seed, reroll_count, guesses_left, score, phase,
                     board_json, log_json, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(day_key) DO NOTHING",
                params![
                    key,
                    snapshot.daily_seed,
                    snapshot.reroll_count,
                    snapshot.guesses_left,
                    snapshot.score,
                    snapshot.phase.as_str(),
                    board_json,
                    log_json,
                    now_millis(),
                ],
            )?,
            Some(base) => self.conn.execute(
                "UPDATE daily_games SET
                    reroll_count = ?2,
                    guesses_left = ?3,
                    score = ?4,
                    phase = ?5,
                    board_json = ?6,
                    log_json = ?7,
                    updated_at = ?8
                 WHERE day_key = ?1 AND reroll_count = ?9 AND guesses_left = ?10",
                params![
                    key,
                    snapshot.reroll_count,
                    snapshot.guesses_left,
                    snapshot.score,
                    snapshot.phase.as_str(),
                    board_json,
                    log_json,
                    now_millis(),
                    base.reroll_count,
                    base.guesses_left,
                ],
            )?,
        };

        if written == 0 {
            warn!(key = %key, ?base, "saved game changed since load");
            return Err(StorageError::Conflict { key });
        }

        info!(
            key = %key,
            reroll_count = snapshot.reroll_count,
            score = snapshot.score,
            "saved game"
        );
        Ok(())
    }

    /// Load the saved game for `seed`, if any.
    pub fn load_game(&self, seed: &str) -> Result<Option<SessionSnapshot>, StorageError> {
        let key = day_key(seed);
        let row = self
            .conn
            .query_row(
                "SELECT seed, reroll_count, guesses_left, score, phase, board_json, log_json
                 FROM daily_games WHERE day_key = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, u32>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((daily_seed, reroll_count, guesses_left, score, phase, board_json, log_json)) = row
        else {
            debug!(key = %key, "no saved game");
            return Ok(None);
        };

        let phase = Phase::parse(&phase).ok_or_else(|| StorageError::CorruptGame {
            key: key.clone(),
            reason: format!("unknown phase {:?}", phase),
        })?;
        let board: Vec<StoredCell> = serde_json::from_str(&board_json)?;
        let log: Vec<LogEntry> = serde_json::from_str(&log_json)?;

        Ok(Some(SessionSnapshot {
            daily_seed,
            reroll_count,
            guesses_left,
            score,
            phase,
            board,
            log,
        }))
    }

    /// Delete the saved game for `seed`. Returns whether one existed.
    pub fn delete_game(&self, seed: &str) -> Result<bool, StorageError> {
        let key = day_key(seed);
        let removed = self
            .conn
            .execute("DELETE FROM daily_games WHERE day_key = ?1", params![key])?;
        info!(key = %key, removed, "deleted game");
        Ok(removed > 0)
    }

    /// Every saved day, newest seed first.
    pub fn list_days(&self) -> Result<Vec<DaySummary>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT day_key, seed, score, guesses_left, phase, updated_at
             FROM daily_games ORDER BY seed DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;

        let mut days = Vec::new();
        for row in rows {
            let (key, seed, score, guesses_left, phase, updated_at) = row?;
            let phase = Phase::parse(&phase).ok_or_else(|| StorageError::CorruptGame {
                key,
                reason: format!("unknown phase {:?}", phase),
            })?;
            days.push(DaySummary {
                seed,
                score,
                guesses_left,
                phase,
                updated_at,
            });
        }
        Ok(days)
    }

    // Private helper methods

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema()?;
        } else if current_version < SCHEMA_VERSION {
            self.migrate_schema(current_version)?;
        } else if current_version > SCHEMA_VERSION {
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        // A meta table without a row is a schema that never finished creating
        let version: Option<u32> = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(version.unwrap_or(0))
    }

    fn create_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- One row per day; the board and log are JSON arrays
            CREATE TABLE IF NOT EXISTS daily_games (
                day_key TEXT PRIMARY KEY,
                seed TEXT NOT NULL,
                reroll_count INTEGER NOT NULL DEFAULT 0,
                guesses_left INTEGER NOT NULL,
                score INTEGER NOT NULL DEFAULT 0,
                phase TEXT NOT NULL,
                board_json TEXT NOT NULL,
                log_json TEXT NOT NULL DEFAULT '[]',
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, now_millis()],
        )?;

        Ok(())
    }

    fn migrate_schema(&self, from_version: u32) -> Result<(), StorageError> {
        let mut current_version = from_version;

        while current_version < SCHEMA_VERSION {
            match current_version {
                1 => {
                    self.migrate_v1_to_v2()?;
                    current_version = 2;
                }
                _ => {
                    return Err(StorageError::MigrationFailed {
                        from: current_version,
                        to: SCHEMA_VERSION,
                        reason: format!("no migration path from version {}", current_version),
                    });
                }
            }
        }

        self.conn.execute(
            "UPDATE meta SET schema_version = ?1",
            params![SCHEMA_VERSION],
        )?;
        info!(from = from_version, to = SCHEMA_VERSION, "migrated schema");

        Ok(())
    }

    /// Migrate from schema v1 to v2: add the guess log column
    fn migrate_v1_to_v2(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "ALTER TABLE daily_games ADD COLUMN log_json TEXT NOT NULL DEFAULT '[]';",
        )?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::game::GameSession;
    use crate::movie::MovieRecord;

    fn played(seed: &str) -> SessionSnapshot {
        let mut session = GameSession::new(catalog(), seed);
        session.apply_guess("578", "Jaws", &MovieRecord::default());
        session.settle(catalog());
        session.replace_cell(catalog(), 0);
        session.snapshot()
    }

    /// A fresh on-disk database, for tests that need two connections.
    fn temp_db(name: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "few-good-films-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("games.db");
        (dir, path)
    }

    fn load(storage: &Storage, seed: &str) -> (GameSession, GameVersion) {
        let snapshot = storage.load_game(seed).unwrap().unwrap();
        let version = GameVersion::from(&snapshot);
        (GameSession::restore(catalog(), snapshot), version)
    }

    #[test]
    fn test_storage_creation() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
        assert!(storage.list_days().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let storage = Storage::open_in_memory().unwrap();
        let snapshot = played("2024-05-01");
        storage.save_game(&snapshot, None).unwrap();

        let loaded = storage.load_game("2024-05-01").unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(storage.load_game("2024-05-02").unwrap().is_none());
    }

    #[test]
    fn test_loaded_game_resumes_sampler() {
        let storage = Storage::open_in_memory().unwrap();
        let snapshot = played("2024-05-01");
        storage.save_game(&snapshot, None).unwrap();

        let mut live = GameSession::restore(catalog(), snapshot);
        let (mut resumed, _) = load(&storage, "2024-05-01");
        assert_eq!(live.replace_cell(catalog(), 4), resumed.replace_cell(catalog(), 4));
    }

    #[test]
    fn test_save_updates_from_loaded_version() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_game(&played("2024-05-01"), None).unwrap();

        let (mut session, version) = load(&storage, "2024-05-01");
        session.replace_cell(catalog(), 2);
        session.apply_guess("680", "Pulp Fiction", &MovieRecord::default());
        storage.save_game(&session.snapshot(), Some(version)).unwrap();

        let loaded = storage.load_game("2024-05-01").unwrap().unwrap();
        assert_eq!(loaded.reroll_count, session.reroll_count());
        assert_eq!(loaded.guesses_left, session.guesses_left());
        assert_eq!(storage.list_days().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_refuses_existing_day() {
        let storage = Storage::open_in_memory().unwrap();
        let first = played("2024-05-01");
        storage.save_game(&first, None).unwrap();

        let mut second = played("2024-05-01");
        second.score = 99;
        assert!(matches!(
            storage.save_game(&second, None),
            Err(StorageError::Conflict { .. })
        ));
        assert_eq!(storage.load_game("2024-05-01").unwrap().unwrap(), first);
    }

    #[test]
    fn test_overlapping_sessions_cannot_lose_a_reroll() {
        let (dir, path) = temp_db("overlap");
        let a = Storage::open_at(&path).unwrap();
        let b = Storage::open_at(&path).unwrap();
        a.save_game(&GameSession::new(catalog(), "2024-05-01").snapshot(), None)
            .unwrap();

        let (mut first, first_base) = load(&a, "2024-05-01");
        let (mut second, second_base) = load(&b, "2024-05-01");
        let first_draw = first.replace_cell(catalog(), 0).unwrap();
        let stale_draw = second.replace_cell(catalog(), 1).unwrap();
        assert_eq!(first_draw.reroll, stale_draw.reroll);

        a.save_game(&first.snapshot(), Some(first_base)).unwrap();
        assert!(matches!(
            b.save_game(&second.snapshot(), Some(second_base)),
            Err(StorageError::Conflict { .. })
        ));

        // Retrying from the fresh state draws with the next discriminator
        let (mut retried, retried_base) = load(&b, "2024-05-01");
        let retry_draw = retried.replace_cell(catalog(), 1).unwrap();
        assert_eq!(retry_draw.reroll, 1);
        b.save_game(&retried.snapshot(), Some(retried_base)).unwrap();

        let stored = a.load_game("2024-05-01").unwrap().unwrap();
        assert_eq!(stored.reroll_count, 2);
        assert_eq!(stored.board[0].id, first_draw.prompt_id);
        assert_eq!(stored.board[1].id, retry_draw.prompt_id);

        drop((a, b));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_delete_game() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_game(&played("2024-05-01"), None).unwrap();

        assert!(storage.delete_game("2024-05-01").unwrap());
        assert!(!storage.delete_game("2024-05-01").unwrap());
        assert!(storage.load_game("2024-05-01").unwrap().is_none());
    }

    #[test]
    fn test_list_days_newest_first() {
        let storage = Storage::open_in_memory().unwrap();
        for seed in ["2024-05-01", "2024-05-03", "2024-05-02"] {
            storage.save_game(&played(seed), None).unwrap();
        }
        let seeds: Vec<String> = storage
            .list_days()
            .unwrap()
            .into_iter()
            .map(|d| d.seed)
            .collect();
        assert_eq!(seeds, vec!["2024-05-03", "2024-05-02", "2024-05-01"]);
    }

    #[test]
    fn test_unknown_phase_is_corrupt() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_game(&played("2024-05-01"), None).unwrap();
        storage
            .conn
            .execute("UPDATE daily_games SET phase = 'paused'", [])
            .unwrap();

        assert!(matches!(
            storage.load_game("2024-05-01"),
            Err(StorageError::CorruptGame { .. })
        ));
    }

    #[test]
    fn test_future_schema_rejected() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute("UPDATE meta SET schema_version = 99", [])
            .unwrap();

        assert!(matches!(
            storage.initialize_schema(),
            Err(StorageError::FutureSchemaVersion { found: 99, supported: SCHEMA_VERSION })
        ));
    }

    #[test]
    fn test_empty_meta_table_is_completed() {
        let storage = Storage {
            conn: Connection::open_in_memory().unwrap(),
        };
        storage
            .conn
            .execute_batch(
                "CREATE TABLE meta (schema_version INTEGER NOT NULL, created_at INTEGER NOT NULL);",
            )
            .unwrap();

        assert_eq!(storage.get_schema_version().unwrap(), 0);
        storage.initialize_schema().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
        storage.save_game(&played("2024-05-01"), None).unwrap();
    }

    #[test]
    fn test_unreadable_meta_is_an_error() {
        let storage = Storage {
            conn: Connection::open_in_memory().unwrap(),
        };
        storage
            .conn
            .execute_batch("CREATE TABLE meta (created_at INTEGER NOT NULL);")
            .unwrap();

        assert!(matches!(
            storage.initialize_schema(),
            Err(StorageError::Database(_))
        ));
    }

    #[test]
    fn test_migrate_from_v1() {
        let storage = Storage {
            conn: Connection::open_in_memory().unwrap(),
        };
        storage
            .conn
            .execute_batch(
                r#"
                CREATE TABLE meta (schema_version INTEGER NOT NULL, created_at INTEGER NOT NULL);
                INSERT INTO meta VALUES (1, 0);
                CREATE TABLE daily_games (
                    day_key TEXT PRIMARY KEY,
                    seed TEXT NOT NULL,
                    reroll_count INTEGER NOT NULL DEFAULT 0,
                    guesses_left INTEGER NOT NULL,
                    score INTEGER NOT NULL DEFAULT 0,
                    phase TEXT NOT NULL,
                    board_json TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                INSERT INTO daily_games VALUES
                    ('daily-game-2024-01-01', '2024-01-01', 3, 8, 2, 'playing', '[]', 0);
                "#,
            )
            .unwrap();

        storage.initialize_schema().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);

        let loaded = storage.load_game("2024-01-01").unwrap().unwrap();
        assert_eq!(loaded.reroll_count, 3);
        assert!(loaded.log.is_empty());
    }

    #[test]
    fn test_open_at_file() {
        let (dir, path) = temp_db("reopen");
        {
            let storage = Storage::open_at(&path).unwrap();
            storage.save_game(&played("2024-05-01"), None).unwrap();
        }
        let reopened = Storage::open_at(&path).unwrap();
        assert!(reopened.load_game("2024-05-01").unwrap().is_some());

        drop(reopened);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
