//! Core library errors.

use store::StoreError;
use thiserror::Error;

/// Errors surfaced by membership resolution and invite selection.
///
/// Collaborator failures are propagated unchanged; nothing at this layer
/// retries or degrades to a partial result.
#[derive(Debug, Error)]
pub enum GroupsError {
    /// Persistence layer failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A non-store collaborator (user directory, ownership) failed.
    #[error("Dependency error: {0}")]
    Dependency(String),

    /// The catalog lists the same group twice.
    #[error("Duplicate catalog entry: {0}")]
    DuplicateCatalogEntry(String),

    /// A bulk collaborator answered with the wrong number of results.
    #[error("Bulk result length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The catalog references a group that has no data.
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// A set member that should be a user id is not one.
    #[error("Invalid user id: {0}")]
    InvalidUid(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An unknown error occurred: {0}")]
    Other(anyhow::Error),
}

impl GroupsError {
    /// Fail with [`GroupsError::LengthMismatch`] unless `actual == expected`.
    pub fn check_len(expected: usize, actual: usize) -> Result<(), GroupsError> {
        if expected == actual {
            Ok(())
        } else {
            Err(GroupsError::LengthMismatch { expected, actual })
        }
    }
}
