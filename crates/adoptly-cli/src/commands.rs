// Rust guideline compliant 2026-10-16

//! Command implementations for the Adoptly CLI.

use adoptly_app::{AppError, BlobStore, ErrorCode, Upload, WorkspaceContext};
use std::path::PathBuf;

pub mod conclude;
pub mod create;
pub mod init;
pub mod list;
pub mod principal;
pub mod remove;
pub mod schedule;
pub mod show;
pub mod update;

/// Maps an error code to the process exit status.
pub fn exit_code(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidInput | ErrorCode::InvalidIdentifier => 2,
        ErrorCode::Unauthenticated => 3,
        ErrorCode::Forbidden => 4,
        ErrorCode::NotFound => 5,
        ErrorCode::Conflict => 6,
        ErrorCode::WorkspaceNotInitialized => 7,
        ErrorCode::OperationFailed => 1,
    }
}

/// Reads image files and stores them in the workspace blob store.
///
/// # Errors
///
/// Returns `InvalidInput` if a file cannot be read, or a validation error
/// naming `images` if a file is not an accepted image.
pub(crate) fn store_images(
    workspace: &WorkspaceContext,
    paths: &[PathBuf],
) -> adoptly_app::Result<Vec<String>> {
    let uploads = paths
        .iter()
        .map(|path| {
            Upload::from_path(path).map_err(|err| {
                AppError::InvalidInput(format!("Cannot read image {}: {}", path.display(), err))
            })
        })
        .collect::<adoptly_app::Result<Vec<_>>>()?;
    workspace.open_blob_store().store(&uploads)
}
