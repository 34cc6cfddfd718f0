use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::storage::{JsonFileStore, MemoryStore, SqliteStore, Storage};

/// Where the ledger lives between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Nothing is persisted
    Memory,
    /// One JSON document
    #[default]
    Json,
    /// One SQLite database
    Sqlite,
}

impl StoreKind {
    fn file_name(self) -> Option<&'static str> {
        match self {
            StoreKind::Memory => None,
            StoreKind::Json => Some("ledger.json"),
            StoreKind::Sqlite => Some("ledger.sqlite3"),
        }
    }
}

/// Per-user data directory, created on demand
pub fn data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "boxscore-ledger")
        .context("Could not determine data directory")?;
    let dir = proj_dirs.data_dir().to_path_buf();

    fs::create_dir_all(&dir).context("Failed to create data directory")?;

    Ok(dir)
}

/// Resolve the data file for `kind`; `None` for the memory store
pub fn resolve_data_path(kind: StoreKind, custom: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let Some(file_name) = kind.file_name() else {
        return Ok(None);
    };
    match custom {
        Some(path) => Ok(Some(path)),
        None => Ok(Some(data_dir()?.join(file_name))),
    }
}

/// Open the store selected on the command line
pub fn open_store(kind: StoreKind, path: Option<&Path>) -> Result<Box<dyn Storage>> {
    let store: Box<dyn Storage> = match (kind, path) {
        (StoreKind::Memory, _) => Box::new(MemoryStore::default()),
        (StoreKind::Json, Some(path)) => Box::new(JsonFileStore::new(path)),
        (StoreKind::Sqlite, Some(path)) => Box::new(
            SqliteStore::open(path)
                .with_context(|| format!("Failed to open SQLite ledger {}", path.display()))?,
        ),
        (kind, None) => anyhow::bail!("The {:?} store needs a data path", kind),
    };

    debug!(store = %store.describe(), "opened store");
    Ok(store)
}
