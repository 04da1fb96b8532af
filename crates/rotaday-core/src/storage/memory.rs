use crate::error::{StateLoadError, StateSaveError};
use crate::state::SessionState;

use super::StateStore;

/// Keeps the last saved state in memory and counts saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Option<SessionState>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a state, as if saved by an earlier run.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionState>, StateLoadError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StateSaveError> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
