// Rust guideline compliant 2026-10-16

//! Blob store for listing images.

use crate::error::{AppError, Result};
use adoptly_core::Field;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Accepted image extensions.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// An uploaded file before it reaches the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name, used for its extension.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Reads an upload from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Turns uploads into stable references the controller stores verbatim.
pub trait BlobStore: Send + Sync {
    /// Stores `uploads` and returns one reference per upload, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an upload is rejected or cannot be written.
    fn store(&self, uploads: &[Upload]) -> Result<Vec<String>>;
}

/// Content-addressed image directory.
///
/// References are file names of the form `<digest>.<ext>`; identical uploads
/// share one file.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    root: PathBuf,
}

impl DirBlobStore {
    /// Creates a store writing into `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the directory holding stored blobs.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a reference to its file path.
    #[must_use]
    pub fn path_of(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

impl BlobStore for DirBlobStore {
    fn store(&self, uploads: &[Upload]) -> Result<Vec<String>> {
        // Reject the whole batch before writing anything.
        let mut named = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match upload.extension() {
                Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
                    let digest = format!("{:x}", Sha256::digest(&upload.bytes));
                    named.push((format!("{}.{}", &digest[..32], ext), upload));
                }
                _ => {
                    tracing::warn!(file = %upload.file_name, "rejected non-image upload");
                    return Err(AppError::missing(Field::Images));
                }
            }
        }

        if !named.is_empty() {
            std::fs::create_dir_all(&self.root)?;
        }

        let mut references = Vec::with_capacity(named.len());
        for (reference, upload) in named {
            let path = self.root.join(&reference);
            if !path.exists() {
                std::fs::write(&path, &upload.bytes)?;
            }
            references.push(reference);
        }

        Ok(references)
    }
}
