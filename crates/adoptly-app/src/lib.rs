// Rust guideline compliant 2026-10-16

//! Application services for Adoptly.
//!
//! This crate holds the adoption controller together with the pieces it is
//! wired to at runtime: credential resolution, the image blob store,
//! workspace discovery and the response envelopes shared by front ends.

pub mod blob;
pub mod controller;
pub mod error;
pub mod identity;
pub mod response;
pub mod workspace;

pub use blob::{BlobStore, DirBlobStore, Upload};
pub use controller::{AdoptionController, Confirmation, PetFields};
pub use error::{AppError, ErrorCode, Result};
pub use identity::{IdentityProvider, StaticIdentityProvider};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use workspace::WorkspaceContext;
