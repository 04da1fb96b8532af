//! Persistence gateway for [`SessionState`].
//!
//! The rest of the crate only sees [`StateStore`]; the JSON file, SQLite
//! and in-memory stores are interchangeable behind it.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::config::StorageBackend;
use crate::error::{ConfigError, StateLoadError, StateSaveError};
use crate::state::SessionState;

/// Load/save contract for the session state.
pub trait StateStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    /// Any state that exists but cannot be read or parsed is an error.
    fn load(&self) -> Result<Option<SessionState>, StateLoadError>;

    /// Replaces whatever was stored before.
    fn save(&mut self, state: &SessionState) -> Result<(), StateSaveError>;

    /// Where the state lives, for messages.
    fn describe(&self) -> String;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn load(&self) -> Result<Option<SessionState>, StateLoadError> {
        (**self).load()
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StateSaveError> {
        (**self).save(state)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open the configured backend inside [`data_dir`].
///
/// # Errors
/// Returns an error if the data directory or the database cannot be opened.
pub fn open_store(backend: StorageBackend) -> Result<Box<dyn StateStore>, crate::CoreError> {
    let dir = data_dir()?;
    Ok(match backend {
        StorageBackend::Json => Box::new(JsonFileStore::new(dir.join("state.json"))),
        StorageBackend::Sqlite => Box::new(SqliteStore::open(dir.join("state.db"))?),
    })
}

/// Returns the data directory, creating it if needed.
///
/// `ROTADAY_DATA_DIR` wins when set. Otherwise this is
/// `~/.config/rotaday[-dev]/`, with `ROTADAY_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("ROTADAY_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ROTADAY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("rotaday-dev")
            } else {
                base_dir.join("rotaday")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
