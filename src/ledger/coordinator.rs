use tracing::{debug, info};

use super::command::{apply, Command};
use crate::error::Result;
use crate::model::Dataset;
use crate::storage::Storage;

/// Single writer over a dataset.
///
/// Commands are applied one at a time through `&mut self`; the new state is
/// saved first and only then replaces the in-memory copy, so a failed
/// command or a failed save leaves both untouched.
pub struct Coordinator {
    store: Box<dyn Storage>,
    state: Dataset,
}

impl Coordinator {
    /// Load the current dataset from `store`
    pub fn open(store: Box<dyn Storage>) -> Result<Self> {
        let state = store.load()?;
        info!(
            store = %store.describe(),
            teams = state.teams.len(),
            matches = state.matches.len(),
            "opened ledger"
        );
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &Dataset {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) -> Result<&Dataset> {
        debug!(command = command.name(), "dispatching");
        let next = apply(&self.state, command)?;
        self.store.save(&next)?;
        self.state = next;
        Ok(&self.state)
    }

    /// Give the store back, for callers that want to reopen it
    pub fn into_store(self) -> Box<dyn Storage> {
        self.store
    }
}
