//! Error types for database access and coordinate parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the database library.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database directory could not be opened. The cause is kept as source.
    #[error("cannot open database '{}'", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: Box<DbError>,
    },

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl DbError {
    pub fn open_failed(path: impl Into<PathBuf>, source: DbError) -> Self {
        DbError::OpenFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// A coordinate string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate '{input}': {reason}")]
pub struct ParseCoordError {
    pub input: String,
    pub reason: String,
}

impl ParseCoordError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
