// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt init` command.
//!
//! Creates the `.adoptly` directory with an empty record file, default
//! configuration and the image directory.

use adoptly_app::WorkspaceContext;
use anyhow::Result;
use std::path::Path;

/// Initializes a workspace at `root`.
///
/// # Errors
///
/// Returns an error if the workspace layout cannot be created.
pub fn execute(root: &Path) -> Result<WorkspaceContext> {
    let workspace = WorkspaceContext::init(root)?;
    println!("✓ Initialized Adoptly workspace in {}", workspace.adoptly_dir().display());
    println!("  Next: adopt principal add <name> --phone <phone>");
    Ok(workspace)
}
