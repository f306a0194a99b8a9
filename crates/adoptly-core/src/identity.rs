// Rust guideline compliant 2026-10-16

//! Hash-based pet identifiers.
//!
//! IDs are 24 lowercase hex characters taken from a SHA-256 digest of the
//! creation inputs. Well-formedness is checked independently of existence so
//! callers can tell a malformed ID apart from a missing record.

use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// Length of a pet ID in hex characters.
pub const ID_LEN: usize = 24;

/// Generates a pet ID from its creation inputs.
///
/// # Arguments
///
/// * `name` - Pet name
/// * `owner_id` - Owner principal ID
/// * `timestamp` - Creation time in nanoseconds
/// * `nonce` - Disambiguator for identical inputs
///
/// # Returns
///
/// A 24-character lowercase hex ID.
pub fn generate_id(name: &str, owner_id: &str, timestamp: i64, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(owner_id.as_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hex = format!("{:x}", hasher.finalize());
    hex[..ID_LEN].to_string()
}

/// Returns true if `id` is a well-formed pet ID (case-insensitive).
pub fn is_well_formed(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validates a stored pet ID.
///
/// # Errors
///
/// Returns `Error::InvalidId` unless the ID is 24 lowercase hex characters.
pub fn validate_id_format(id: &str) -> Result<()> {
    if is_well_formed(id) && !id.bytes().any(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(Error::InvalidId(id.to_string()))
    }
}

/// Normalizes a caller-supplied ID to its stored form.
///
/// # Errors
///
/// Returns `Error::InvalidId` if the input is not a well-formed ID.
pub fn normalize_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if !is_well_formed(trimmed) {
        return Err(Error::InvalidId(input.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}
