// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt show` command.

use crate::OutputFormatter;
use adoptly_app::WorkspaceContext;
use adoptly_core::Pet;
use anyhow::Result;

/// Shows one pet by ID.
///
/// # Errors
///
/// Returns an error if the ID is malformed, no pet matches, or the records
/// cannot be read.
pub fn execute(
    workspace: &WorkspaceContext,
    id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<Pet> {
    let pet = workspace.controller()?.get_by_id(id)?;
    println!("{}", formatter.format_pet(&pet));
    Ok(pet)
}
