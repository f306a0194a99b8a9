// Rust guideline compliant 2026-10-16

//! Workspace discovery and path management.
//!
//! A workspace is a directory containing `.adoptly/` with the pet records,
//! the principal directory, configuration and stored images.

use crate::blob::DirBlobStore;
use crate::controller::AdoptionController;
use crate::error::{AppError, Result};
use crate::identity::StaticIdentityProvider;
use adoptly_core::{Config, JsonlStore};
use std::path::{Path, PathBuf};

/// Name of the workspace metadata directory.
pub const WORKSPACE_DIR: &str = ".adoptly";

/// Path metadata for an Adoptly workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    root: PathBuf,
    adoptly_dir: PathBuf,
    pets_path: PathBuf,
    principals_path: PathBuf,
    images_dir: PathBuf,
}

impl WorkspaceContext {
    /// Discovers a workspace starting from an optional root.
    ///
    /// # Arguments
    ///
    /// * `root` - Optional workspace root; defaults to the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.adoptly` directory is missing
    pub fn discover(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        if !context.adoptly_dir.exists() {
            return Err(AppError::WorkspaceNotInitialized {
                path: context.adoptly_dir,
            });
        }
        Ok(context)
    }

    /// Creates the workspace layout under `root`.
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn init(root: &Path) -> Result<Self> {
        let context = Self::at(root.to_path_buf());

        std::fs::create_dir_all(&context.images_dir)?;
        for path in [&context.pets_path, &context.principals_path] {
            if !path.exists() {
                std::fs::write(path, "")?;
            }
        }
        if !context.config_path().exists() {
            Config::default().save(&context.adoptly_dir)?;
        }

        tracing::info!(path = %context.adoptly_dir.display(), "initialized workspace");
        Ok(context)
    }

    fn at(root: PathBuf) -> Self {
        let adoptly_dir = root.join(WORKSPACE_DIR);
        Self {
            root,
            pets_path: adoptly_dir.join("pets.jsonl"),
            principals_path: adoptly_dir.join("principals.toml"),
            images_dir: adoptly_dir.join("images"),
            adoptly_dir,
        }
    }

    /// Returns the workspace root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.adoptly` directory path.
    #[must_use]
    pub fn adoptly_dir(&self) -> &Path {
        &self.adoptly_dir
    }

    /// Returns the pet records path.
    #[must_use]
    pub fn pets_path(&self) -> &Path {
        &self.pets_path
    }

    /// Returns the principal directory path.
    #[must_use]
    pub fn principals_path(&self) -> &Path {
        &self.principals_path
    }

    /// Returns the image directory path.
    #[must_use]
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.adoptly_dir.join("config.toml")
    }

    /// Opens the pet record store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_store(&self) -> Result<JsonlStore> {
        Ok(JsonlStore::new(self.pets_path.clone())?)
    }

    /// Loads the principal directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `principals.toml` exists but cannot be parsed.
    pub fn open_identity(&self) -> Result<StaticIdentityProvider> {
        StaticIdentityProvider::load(&self.principals_path)
    }

    /// Returns the image blob store.
    #[must_use]
    pub fn open_blob_store(&self) -> DirBlobStore {
        DirBlobStore::new(self.images_dir.clone())
    }

    /// Loads workspace configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(&self.adoptly_dir)?)
    }

    /// Builds a controller over this workspace's store and principals.
    ///
    /// # Errors
    ///
    /// Returns an error if the store, principals or configuration cannot be
    /// opened.
    pub fn controller(&self) -> Result<AdoptionController<JsonlStore, StaticIdentityProvider>> {
        let config = self.load_config()?;
        Ok(AdoptionController::from_config(
            self.open_store()?,
            self.open_identity()?,
            &config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let result = WorkspaceContext::discover(Some(temp_dir.path()));
        assert!(matches!(
            result,
            Err(AppError::WorkspaceNotInitialized { .. })
        ));
    }

    #[test]
    fn test_init_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let context = WorkspaceContext::init(temp_dir.path()).unwrap();

        assert!(context.pets_path().exists());
        assert!(context.principals_path().exists());
        assert!(context.images_dir().is_dir());
        assert!(context.config_path().exists());
        assert!(WorkspaceContext::discover(Some(temp_dir.path())).is_ok());
    }

    #[test]
    fn test_init_keeps_existing_records() {
        let temp_dir = TempDir::new().unwrap();
        let context = WorkspaceContext::init(temp_dir.path()).unwrap();
        std::fs::write(context.pets_path(), "keep\n").unwrap();

        WorkspaceContext::init(temp_dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(context.pets_path()).unwrap(), "keep\n");
    }
}
