// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt remove` command.

use crate::OutputFormatter;
use adoptly_app::{Confirmation, WorkspaceContext};
use anyhow::Result;

/// Deletes one of the caller's listings.
///
/// # Errors
///
/// Returns an error if the credential is not accepted, the pet is unknown,
/// not owned by the caller or already adopted, or the delete fails.
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<Confirmation> {
    let confirmation = workspace.controller()?.remove(credential, id)?;
    println!("{}", formatter.format_confirmation(&confirmation));
    Ok(confirmation)
}
