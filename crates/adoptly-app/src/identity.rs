// Rust guideline compliant 2026-10-16

//! Identity provider: resolves opaque credentials to principals.
//!
//! The bundled provider is a static directory kept in `principals.toml`.
//! Only SHA-256 digests of access tokens are stored; the plain token is shown
//! once, when the principal is registered.

use crate::error::{AppError, Result};
use adoptly_core::Principal;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves a request credential to the acting principal.
pub trait IdentityProvider: Send + Sync {
    /// Returns the principal behind `credential`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` if the credential is missing or unknown.
    fn resolve(&self, credential: &str) -> Result<Principal>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    fn resolve(&self, credential: &str) -> Result<Principal> {
        (**self).resolve(credential)
    }
}

/// One entry of `principals.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalRecord {
    /// Principal ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Optional profile image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hex SHA-256 digest of the access token.
    pub token_sha256: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrincipalFile {
    #[serde(default)]
    principals: Vec<PrincipalRecord>,
}

/// Principal directory keyed by token digest.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    by_digest: HashMap<String, Principal>,
    records: Vec<PrincipalRecord>,
    path: Option<PathBuf>,
}

impl StaticIdentityProvider {
    /// Creates an empty, in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the directory from `path`; a missing file yields an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let mut provider = Self {
            path: Some(path.to_path_buf()),
            ..Self::default()
        };

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: PrincipalFile = toml::from_str(&content).map_err(|e| {
                AppError::InvalidInput(format!("Invalid principals file: {}", e))
            })?;
            for record in file.principals {
                provider.index(record);
            }
        }

        Ok(provider)
    }

    /// Adds a principal reachable with `token`.
    pub fn insert(&mut self, token: &str, principal: Principal) {
        self.index(PrincipalRecord {
            id: principal.id,
            name: principal.name,
            phone: principal.phone,
            image: principal.image,
            token_sha256: digest_token(token),
        });
    }

    /// Registers a new principal, persists the directory and returns the
    /// principal with its freshly generated token.
    ///
    /// # Errors
    ///
    /// Returns an error if name or phone is blank, or the file cannot be written.
    pub fn register(
        &mut self,
        name: &str,
        phone: &str,
        image: Option<String>,
    ) -> Result<(Principal, String)> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("Name is required".to_string()));
        }
        if phone.trim().is_empty() {
            return Err(AppError::InvalidInput("Phone is required".to_string()));
        }

        let token = generate_token();
        let principal = Principal {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            image,
            phone: phone.trim().to_string(),
        };
        let record = PrincipalRecord {
            id: principal.id.clone(),
            name: principal.name.clone(),
            phone: principal.phone.clone(),
            image: principal.image.clone(),
            token_sha256: digest_token(&token),
        };

        match self.path.clone() {
            Some(path) => self.append_locked(&path, record)?,
            None => self.index(record),
        }

        tracing::info!(principal_id = %principal.id, "registered principal");
        Ok((principal, token))
    }

    /// Returns the number of known principals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no principals are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn index(&mut self, record: PrincipalRecord) {
        self.by_digest.insert(
            record.token_sha256.to_lowercase(),
            Principal {
                id: record.id.clone(),
                name: record.name.clone(),
                image: record.image.clone(),
                phone: record.phone.clone(),
            },
        );
        self.records.push(record);
    }

    /// Re-reads the directory under an exclusive lock, appends `record` and
    /// writes it back. On success `self` reflects the file as written.
    fn append_locked(&mut self, path: &Path, record: PrincipalRecord) -> Result<()> {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;

        let result = Self::load(path).and_then(|mut current| {
            current.index(record);
            current.save(path)?;
            Ok(current)
        });

        let _ = lock_file.unlock();

        *self = result?;
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let file = PrincipalFile {
            principals: self.records.clone(),
        };
        let content = toml::to_string_pretty(&file)
            .map_err(|e| AppError::InvalidInput(format!("Failed to serialize principals: {}", e)))?;

        let temp_path = path.with_extension("toml.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn resolve(&self, credential: &str) -> Result<Principal> {
        let token = strip_scheme(credential);
        if token.is_empty() {
            return Err(AppError::Unauthenticated);
        }

        self.by_digest
            .get(&digest_token(token))
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

/// Accepts both raw tokens and `Bearer <token>` header values.
fn strip_scheme(credential: &str) -> &str {
    let trimmed = credential.trim();
    match trimmed.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => trimmed,
    }
}

/// Returns the hex SHA-256 digest of `token`.
pub fn digest_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Generates a 256-bit random access token, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn principal(id: &str) -> Principal {
        Principal {
            id: id.to_string(),
            name: "Olivia".to_string(),
            image: None,
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn test_resolve_known_token() {
        let mut provider = StaticIdentityProvider::new();
        provider.insert("secret", principal("o1"));

        assert_eq!(provider.resolve("secret").unwrap().id, "o1");
        assert_eq!(provider.resolve("Bearer secret").unwrap().id, "o1");
    }

    #[test]
    fn test_resolve_unknown_or_empty_token() {
        let mut provider = StaticIdentityProvider::new();
        provider.insert("secret", principal("o1"));

        assert!(matches!(provider.resolve("other"), Err(AppError::Unauthenticated)));
        assert!(matches!(provider.resolve(""), Err(AppError::Unauthenticated)));
        assert!(matches!(provider.resolve("Bearer "), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_register_persists_digest_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("principals.toml");

        let mut provider = StaticIdentityProvider::load(&path).unwrap();
        let (registered, token) = provider.register("Paul", "555-0199", None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains(&token));
        assert!(content.contains(&digest_token(&token)));

        let reloaded = StaticIdentityProvider::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.resolve(&token).unwrap(), registered);
    }

    #[test]
    fn test_concurrent_registrations_are_all_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("principals.toml");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut provider = StaticIdentityProvider::load(&path).unwrap();
                    provider
                        .register(&format!("Adopter {}", i), "555-0000", None)
                        .unwrap()
                })
            })
            .collect();

        let tokens: Vec<String> = handles
            .into_iter()
            .map(|handle| handle.join().expect("Thread panicked").1)
            .collect();

        let reloaded = StaticIdentityProvider::load(&path).unwrap();
        assert_eq!(reloaded.len(), 8);
        for token in &tokens {
            assert!(reloaded.resolve(token).is_ok());
        }
    }

    #[test]
    fn test_register_requires_phone() {
        let mut provider = StaticIdentityProvider::new();
        assert!(provider.register("Paul", "  ", None).is_err());
        assert!(provider.is_empty());
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
