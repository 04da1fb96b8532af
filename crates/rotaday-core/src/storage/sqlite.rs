//! SQLite-backed state store.
//!
//! The state document lives as JSON in a small key-value table, so the
//! schema never has to track the model.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{StateLoadError, StateSaveError};
use crate::state::SessionState;

use super::StateStore;

const STATE_KEY: &str = "session_state";

pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateLoadError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StateLoadError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<SessionState>, StateLoadError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![STATE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        value
            .map(|text| {
                serde_json::from_str(&text).map_err(|e| StateLoadError::Corrupt {
                    location: format!("{}#{STATE_KEY}", self.describe()),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StateSaveError> {
        let text =
            serde_json::to_string(state).map_err(|e| StateSaveError::Serialize(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![STATE_KEY, text],
        )?;
        tracing::debug!(store = %self.describe(), "state saved");
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }
}
