//! Persistence error types.
//!
//! The simulation itself has no failure modes; only the key-value store behind
//! the upgrade blob can fail, and callers degrade to defaults on error.

use std::fmt;

/// Failure while reading or writing the persisted upgrade record
#[derive(Debug)]
pub enum StoreError {
    /// No storage backend is reachable (no window, storage disabled, private mode).
    Unavailable,
    /// The record could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// The backend rejected the write (quota exceeded, security error).
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage backend unavailable"),
            StoreError::Serialize(e) => write!(f, "failed to encode upgrade record: {}", e),
            StoreError::Write(reason) => write!(f, "storage write rejected: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e)
    }
}
