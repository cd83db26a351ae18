use std::path::PathBuf;

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Failure modes of the persistence layer. Callers treat `Open` as fatal at
/// startup; everything else is reported and the menu loop continues.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened. Raised only while bringing up
    /// the store.
    #[error("could not open database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: SqlError,
    },
    /// The application data directory could not be created.
    #[error("could not create data directory at {path}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// No home directory to anchor the data directory under.
    #[error("could not locate home directory")]
    NoHomeDir,
    /// The storage engine rejected a write, typically a foreign-key check on
    /// an enrollment whose student or catalog reference does not exist.
    #[error("{0}")]
    Constraint(String),
    /// Any other SQLite error.
    #[error(transparent)]
    Sqlite(#[from] SqlError),
}

impl StoreError {
    /// Coerce SQLite constraint errors into human-readable messages so the UI
    /// footer can show something friendlier than a raw error code. Other
    /// errors pass through untouched.
    pub(crate) fn from_write(err: SqlError, what: &str) -> Self {
        if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
            StoreError::Constraint(format!("{what}: rejected by a database constraint"))
        } else {
            StoreError::Sqlite(err)
        }
    }
}
