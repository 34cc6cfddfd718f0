//! Pluggable persistence for the dataset.
//!
//! The ledger only ever calls [`Storage::load`] and [`Storage::save`]; which
//! store sits behind them is decided by configuration.

pub mod json;
pub mod schema;
pub mod schema_gen;
pub mod sqlite;

pub use json::JsonFileStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::model::Dataset;

pub trait Storage {
    /// Read the whole dataset; a store that was never written loads empty
    fn load(&self) -> Result<Dataset>;

    /// Replace the stored dataset with `dataset`
    fn save(&mut self, dataset: &Dataset) -> Result<()>;

    /// Short description for logs ("json file /path/ledger.json")
    fn describe(&self) -> String;
}

/// Keeps the dataset in memory only; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: Dataset,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl Storage for MemoryStore {
    fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn save(&mut self, dataset: &Dataset) -> Result<()> {
        self.dataset = dataset.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
