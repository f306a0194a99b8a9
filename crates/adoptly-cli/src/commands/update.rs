// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt update` command.
//!
//! Every descriptive field and the availability flag must be supplied.
//! Images are replaced only when new files are given, and are stored only
//! once the request has passed every guard.

use crate::OutputFormatter;
use adoptly_app::{Confirmation, PetFields, WorkspaceContext};
use anyhow::Result;
use std::path::PathBuf;

/// Updates one of the caller's listings.
///
/// # Arguments
///
/// * `workspace` - The workspace to write into
/// * `credential` - Caller access token
/// * `id` - Pet ID
/// * `fields` - Replacement fields including `available`
/// * `images` - Replacement image files; empty keeps the current images
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The credential is not accepted
/// - The pet is unknown, not owned by the caller, or already adopted
/// - A field is missing
/// - An image file cannot be read or is not an accepted image
/// - The record cannot be written
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    id: &str,
    fields: PetFields,
    images: &[PathBuf],
    formatter: &dyn OutputFormatter,
) -> Result<Confirmation> {
    let controller = workspace.controller()?;
    controller.check_update(credential, id, &fields, images.len())?;

    let references = if images.is_empty() {
        Vec::new()
    } else {
        super::store_images(workspace, images)?
    };

    let confirmation = controller.update(credential, id, fields, references)?;
    println!("{}", formatter.format_confirmation(&confirmation));
    Ok(confirmation)
}
