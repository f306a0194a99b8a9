// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt create` command.
//!
//! Checks the request, stores the listing images, then lists a new pet
//! owned by the caller.

use crate::OutputFormatter;
use adoptly_app::{PetFields, WorkspaceContext};
use adoptly_core::Pet;
use anyhow::Result;
use std::path::PathBuf;

/// Lists a new pet for adoption.
///
/// # Arguments
///
/// * `workspace` - The workspace to write into
/// * `credential` - Caller access token
/// * `fields` - Name, age, weight and color
/// * `images` - Image files to attach, at least one
/// * `formatter` - The output formatter to use
///
/// # Returns
///
/// The stored pet.
///
/// # Errors
///
/// Returns an error if:
/// - The credential is not accepted
/// - A field is missing (reported in field order, images last)
/// - More images are given than the workspace allows
/// - An image file cannot be read or is not an accepted image
/// - The record cannot be written
pub fn execute(
    workspace: &WorkspaceContext,
    credential: &str,
    fields: PetFields,
    images: &[PathBuf],
    formatter: &dyn OutputFormatter,
) -> Result<Pet> {
    let controller = workspace.controller()?;
    controller.check_create(credential, &fields, images.len())?;

    let references = super::store_images(workspace, images)?;

    let pet = controller.create(credential, fields, references)?;
    println!("{}", formatter.format_created(&pet));
    Ok(pet)
}
