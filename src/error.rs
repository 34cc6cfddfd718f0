//! Error types for parsing, ledger commands and storage

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The raw statistics block is structurally broken
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A command referenced an entity that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A command would break a uniqueness rule (team name, team + jersey number)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A bundle whose match does not reference its own team stubs
    #[error("Invalid match bundle: {0}")]
    InvalidBundle(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
