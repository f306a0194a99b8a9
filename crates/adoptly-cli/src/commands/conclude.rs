// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt conclude` command.

use crate::OutputFormatter;
use adoptly_app::{Confirmation, WorkspaceContext};
use anyhow::Result;

/// Marks one of the caller's pets as adopted.
///
/// # Errors
///
/// Returns an error if the credential is not accepted, the pet is unknown
/// or not owned by the caller, or the record cannot be written.
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<Confirmation> {
    let confirmation = workspace.controller()?.conclude_adoption(credential, id)?;
    println!("{}", formatter.format_confirmation(&confirmation));
    Ok(confirmation)
}
