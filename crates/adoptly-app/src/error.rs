// Rust guideline compliant 2026-10-16

//! Error handling for Adoptly application services.

use adoptly_core::{Error as CoreError, Field};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable outcome codes for failed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required field was missing or invalid.
    ValidationFailed,
    /// The credential did not resolve to a principal.
    Unauthenticated,
    /// The principal may not act on this pet.
    Forbidden,
    /// No pet matches the identifier.
    NotFound,
    /// The identifier is malformed.
    InvalidIdentifier,
    /// The pet's state or a concurrent write rules the operation out.
    Conflict,
    /// The record store failed.
    OperationFailed,
    /// The workspace has not been initialized.
    WorkspaceNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or out of range.
    #[error("{field} is required")]
    Validation {
        /// The first violated field.
        field: Field,
    },

    /// Missing or unknown credential.
    #[error("Access denied: missing or invalid credential")]
    Unauthenticated,

    /// The principal is authenticated but not allowed to act.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No pet with this ID exists.
    #[error("Pet not found: {0}")]
    NotFound(String),

    /// The ID is not well-formed.
    #[error("Invalid pet ID: {0}")]
    InvalidIdentifier(String),

    /// The operation conflicts with the pet's current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record store failed while serving the request.
    #[error("Operation failed: {source}")]
    OperationFailed {
        /// Underlying store error.
        #[source]
        source: CoreError,
    },

    /// Workspace is missing or not initialized.
    #[error("Adoptly workspace not initialized at {path}. Run 'adopt init' first.")]
    WorkspaceNotInitialized {
        /// Path where `.adoptly` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationFailed,
            AppError::Unauthenticated => ErrorCode::Unauthenticated,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::OperationFailed { .. } => ErrorCode::OperationFailed,
            AppError::WorkspaceNotInitialized { .. } => ErrorCode::WorkspaceNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::OperationFailed,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::InvalidId(_) => ErrorCode::InvalidIdentifier,
                CoreError::AlreadyExists(_)
                | CoreError::RevisionConflict { .. }
                | CoreError::InvalidTransition(_) => ErrorCode::Conflict,
                CoreError::InvalidPet(_) => ErrorCode::ValidationFailed,
                CoreError::InvalidConfig(_) => ErrorCode::InvalidInput,
                CoreError::Io(_) | CoreError::Json(_) | CoreError::Lock(_) => {
                    ErrorCode::OperationFailed
                }
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation { field } => Some(serde_json::json!({
                "field": field,
            })),
            AppError::WorkspaceNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::Core(CoreError::RevisionConflict {
                id,
                expected,
                actual,
            }) => Some(serde_json::json!({
                "id": id,
                "expected_revision": expected,
                "actual_revision": actual,
            })),
            _ => None,
        }
    }

    /// Builds a validation error for `field`.
    #[must_use]
    pub fn missing(field: Field) -> Self {
        AppError::Validation { field }
    }

    /// Maps a store error raised while writing.
    ///
    /// Lost compare-and-swap races become conflicts and vanished records
    /// become not-found; everything else is an opaque operation failure that
    /// keeps the cause as its source.
    #[must_use]
    pub fn from_write(err: CoreError) -> Self {
        match err {
            CoreError::RevisionConflict { id, .. } => AppError::Conflict(format!(
                "Pet {} was modified concurrently, reload and retry",
                id
            )),
            CoreError::NotFound(id) => AppError::NotFound(id),
            other => AppError::OperationFailed { source: other },
        }
    }

    /// Maps a store error raised while reading.
    #[must_use]
    pub fn from_read(err: CoreError) -> Self {
        AppError::OperationFailed { source: err }
    }
}
