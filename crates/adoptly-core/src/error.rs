// Rust guideline compliant 2026-10-16

//! Error types for the Adoptly core library.

use thiserror::Error;

/// Result type alias for Adoptly core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Adoptly core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid Pet data.
    #[error("Invalid pet: {0}")]
    InvalidPet(String),

    /// Identifier is not a well-formed pet ID.
    #[error("Invalid pet ID: {0}")]
    InvalidId(String),

    /// Pet not found.
    #[error("Pet not found: {0}")]
    NotFound(String),

    /// A pet with the same ID is already stored.
    #[error("Pet already exists: {0}")]
    AlreadyExists(String),

    /// The stored revision moved on since the record was read.
    #[error("Revision conflict on {id}: expected {expected}, found {actual}")]
    RevisionConflict {
        /// Pet ID.
        id: String,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Invalid lifecycle transition.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Store lock could not be acquired.
    #[error("Lock error: {0}")]
    Lock(String),
}
