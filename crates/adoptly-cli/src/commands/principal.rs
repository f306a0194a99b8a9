// Rust guideline compliant 2026-10-16

//! Implementation of the `adopt principal` commands.

use crate::OutputFormatter;
use adoptly_app::WorkspaceContext;
use anyhow::Result;
use std::path::PathBuf;

/// Registers a principal and prints its one-time access token.
///
/// # Arguments
///
/// * `workspace` - The workspace to register into
/// * `name` - Display name
/// * `phone` - Contact phone shared with would-be adopters
/// * `image` - Optional profile image file
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - name or phone is blank
/// - The image is not an accepted image file
/// - `principals.toml` cannot be read or written
pub fn add(
    workspace: &WorkspaceContext,
    name: &str,
    phone: &str,
    image: Option<PathBuf>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let image = match image {
        Some(path) => super::store_images(workspace, &[path])?.into_iter().next(),
        None => None,
    };

    let mut identity = workspace.open_identity()?;
    let (principal, token) = identity.register(name, phone, image)?;

    println!("{}", formatter.format_principal(&principal, &token));
    Ok(())
}
