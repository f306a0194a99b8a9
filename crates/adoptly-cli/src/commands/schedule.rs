// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt schedule` command.
//!
//! Books a visit and prints the owner's contact details.

use crate::OutputFormatter;
use adoptly_app::{Confirmation, WorkspaceContext};
use anyhow::Result;

/// Records the caller as the would-be adopter of a pet.
///
/// # Errors
///
/// Returns an error if:
/// - The credential is not accepted
/// - The pet is unknown or already adopted
/// - The caller owns the pet or already booked it
/// - Another adopter holds the pet under the exclusive policy
/// - The record cannot be written
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<Confirmation> {
    let confirmation = workspace.controller()?.schedule(credential, id)?;
    println!("{}", formatter.format_confirmation(&confirmation));
    Ok(confirmation)
}
