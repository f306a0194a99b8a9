// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt list` command.

use crate::OutputFormatter;
use adoptly_app::WorkspaceContext;
use adoptly_core::Pet;
use anyhow::Result;

/// Which pets to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    /// Every pet.
    #[default]
    All,
    /// Pets still open for adoption.
    Available,
    /// Pets whose adoption has been concluded.
    Adopted,
    /// The caller's own listings.
    Mine,
    /// Pets the caller has scheduled a visit for or adopted.
    Adoptions,
}

/// Lists pets, newest first.
///
/// # Arguments
///
/// * `workspace` - The workspace to read from
/// * `credential` - Caller access token; only needed for `Mine` and `Adoptions`
/// * `scope` - Which pets to list
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if the credential is required but not accepted, or the
/// records cannot be read.
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    scope: ListScope,
    formatter: &dyn OutputFormatter,
) -> Result<Vec<Pet>> {
    let controller = workspace.controller()?;

    let pets = match scope {
        ListScope::All => controller.get_all()?,
        ListScope::Available => controller.browse(Some(true))?,
        ListScope::Adopted => controller.browse(Some(false))?,
        ListScope::Mine => controller.get_by_owner(credential)?,
        ListScope::Adoptions => controller.get_by_adopter(credential)?,
    };

    println!("{}", formatter.format_list(&pets));
    Ok(pets)
}
