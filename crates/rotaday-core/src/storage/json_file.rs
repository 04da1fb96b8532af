//! Session state as a pretty-printed JSON document.

use std::path::{Path, PathBuf};

use crate::error::{StateLoadError, StateSaveError};
use crate::state::SessionState;

use super::StateStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a state document from `path`.
    ///
    /// Used for one-off imports as well as by [`StateStore::load`].
    pub fn read(path: &Path) -> Result<SessionState, StateLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| StateLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        // Files written by Windows editors may carry a BOM.
        let text = text.trim_start_matches('\u{feff}');
        serde_json::from_str(text).map_err(|e| StateLoadError::Corrupt {
            location: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionState>, StateLoadError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Self::read(&self.path).map(Some)
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StateSaveError> {
        let text = serde_json::to_string_pretty(state)
            .map_err(|e| StateSaveError::Serialize(e.to_string()))?;
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)
            .and_then(|()| std::fs::rename(&tmp, &self.path))
            .map_err(|source| StateSaveError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
