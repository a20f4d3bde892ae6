//! Error types for the persistence and settings boundaries
//!
//! Nothing here ever reaches the session: callers log and fall back.

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// Opening or migrating the database failed
    Open(String),
    /// A query or statement failed
    Query(String),
    /// The store's lock was poisoned by a panicking writer
    Poisoned,
    /// A stored value did not fit the in-memory type
    OutOfRange { column: &'static str, value: i64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(msg) => write!(f, "failed to open score store: {msg}"),
            Self::Query(msg) => write!(f, "score store query failed: {msg}"),
            Self::Poisoned => write!(f, "score store lock poisoned"),
            Self::OutOfRange { column, value } => {
                write!(f, "stored {column} value {value} is out of range")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Query(err.to_string())
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings I/O error: {err}"),
            Self::Json(err) => write!(f, "settings JSON error: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
