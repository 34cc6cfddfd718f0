use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Storage;
use crate::error::Result;
use crate::model::Dataset;

/// The whole dataset as one pretty-printed JSON document
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
}

impl Storage for JsonFileStore {
    fn load(&self) -> Result<Dataset> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger file yet");
            return Ok(Dataset::default());
        }

        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(dataset)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), matches = dataset.matches.len(), "saved ledger");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
