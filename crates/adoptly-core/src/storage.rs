// Rust guideline compliant 2026-10-16

//! Storage module for pet records.
//!
//! Defines the `RecordStore` contract used by the adoption controller and a
//! JSONL file implementation. Every write is a compare-and-swap on the
//! record's `revision`, performed under an exclusive file lock.

use crate::clock::{Clock, SystemClock};
use crate::{Error, Pet, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Record count above which filtering runs in parallel.
const PARALLEL_THRESHOLD: usize = 1_000;

/// Filter applied by `RecordStore::find`.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    /// Match on `owner.id`.
    pub owner_id: Option<String>,
    /// Match on `adopter.id`.
    pub adopter_id: Option<String>,
    /// Match on `available`.
    pub available: Option<bool>,
}

impl PetFilter {
    /// Matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches listings owned by `owner_id`.
    #[must_use]
    pub fn by_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Self::default()
        }
    }

    /// Matches listings whose recorded adopter is `adopter_id`.
    #[must_use]
    pub fn by_adopter(adopter_id: impl Into<String>) -> Self {
        Self {
            adopter_id: Some(adopter_id.into()),
            ..Self::default()
        }
    }

    /// Restricts the filter to the given availability.
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Returns true if `pet` passes the filter.
    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(owner_id) = &self.owner_id {
            if pet.owner.id != *owner_id {
                return false;
            }
        }

        if let Some(adopter_id) = &self.adopter_id {
            if !pet.is_adopted_by(adopter_id) {
                return false;
            }
        }

        if let Some(available) = self.available {
            if pet.available != available {
                return false;
            }
        }

        true
    }
}

/// Persistence contract consumed by the adoption controller.
///
/// Stores own `created_at`, `updated_at` and `revision`; values supplied by
/// callers for those fields are overwritten.
pub trait RecordStore: Send + Sync {
    /// Inserts a new record, stamping both timestamps and revision 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is invalid, its ID is taken, or the
    /// write fails.
    fn insert(&self, pet: Pet) -> Result<Pet>;

    /// Loads a record by its normalized ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, id: &str) -> Result<Option<Pet>>;

    /// Loads all records passing `filter`, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find(&self, filter: &PetFilter) -> Result<Vec<Pet>>;

    /// Replaces a record if its stored revision equals `expected_revision`.
    ///
    /// Keeps the stored `created_at`, refreshes `updated_at` and increments
    /// the revision.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the record is gone,
    /// `Error::RevisionConflict` if another write landed first, or an error
    /// if the record is invalid or the write fails.
    fn replace(&self, pet: Pet, expected_revision: u64) -> Result<Pet>;

    /// Deletes a record if its stored revision equals `expected_revision`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::RevisionConflict` as for
    /// `replace`, or an error if the write fails.
    fn delete(&self, id: &str, expected_revision: u64) -> Result<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn insert(&self, pet: Pet) -> Result<Pet> {
        (**self).insert(pet)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Pet>> {
        (**self).find_by_id(id)
    }

    fn find(&self, filter: &PetFilter) -> Result<Vec<Pet>> {
        (**self).find(filter)
    }

    fn replace(&self, pet: Pet, expected_revision: u64) -> Result<Pet> {
        (**self).replace(pet, expected_revision)
    }

    fn delete(&self, id: &str, expected_revision: u64) -> Result<()> {
        (**self).delete(id, expected_revision)
    }
}

/// Filters `pets` and orders the result newest first.
pub fn select(pets: Vec<Pet>, filter: &PetFilter) -> Vec<Pet> {
    let mut selected: Vec<Pet> = if pets.len() >= PARALLEL_THRESHOLD {
        pets.into_par_iter().filter(|p| filter.matches(p)).collect()
    } else {
        pets.into_iter().filter(|p| filter.matches(p)).collect()
    };
    sort_newest_first(&mut selected);
    selected
}

/// Sorts by `created_at` descending, then ID descending.
///
/// The ID tie-break keeps the order total for records created in the same
/// millisecond.
pub fn sort_newest_first(pets: &mut [Pet]) {
    pets.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

pub(crate) fn check_revision(stored: &Pet, expected: u64) -> Result<()> {
    if stored.revision != expected {
        return Err(Error::RevisionConflict {
            id: stored.id.clone(),
            expected,
            actual: stored.revision,
        });
    }
    Ok(())
}

/// JSONL file store.
///
/// One pet per line. Writes rewrite the file through a temp file and rename,
/// so readers never observe a partial file.
pub struct JsonlStore {
    /// Path to the JSONL file.
    path: PathBuf,
    /// Timestamp source.
    clock: Arc<dyn Clock>,
}

impl JsonlStore {
    /// Creates a store backed by `path` using the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Creates a store backed by `path` using `clock` for timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::validate_path(&path)?;
        Ok(Self { path, clock })
    }

    fn validate_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(())
    }

    /// Returns a reference to the JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all records, one JSON document per line.
    ///
    /// Malformed lines and records that fail validation are skipped with a
    /// warning. The next write drops them from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn load_all(&self) -> Result<Vec<Pet>> {
        let mut pets = Vec::new();
        self.scan(|pet| {
            pets.push(pet);
            false
        })?;
        Ok(pets)
    }

    /// Visits records in file order until `visit` returns true.
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Pet) -> bool,
    {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        if !self.path.exists() {
            return Ok(());
        }

        let reader = BufReader::new(File::open(&self.path)?);

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Pet>(&line) {
                Ok(pet) => {
                    if let Err(e) = pet.validate() {
                        tracing::warn!(
                            path = %self.path.display(),
                            line = number + 1,
                            error = %e,
                            "skipping invalid pet record"
                        );
                        continue;
                    }
                    if visit(pet) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = number + 1,
                        error = %e,
                        "skipping malformed JSONL line"
                    );
                }
            }
        }

        Ok(())
    }

    /// Replaces the whole file with `pets`.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails validation or the atomic write fails.
    pub fn save_all(&self, pets: &[Pet]) -> Result<()> {
        use std::fs::File;
        use std::io::{BufWriter, Write};

        for pet in pets {
            pet.validate()?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);

            for pet in pets {
                let json = serde_json::to_string(pet)?;
                writer.write_all(json.as_bytes())?;
                writer.write_all(b"\n")?;
            }

            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Executes a closure with an exclusive lock on the store.
    ///
    /// Blocks until the lock is available, so concurrent writers are
    /// serialized rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be opened or locked, or if
    /// the closure fails.
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file
            .lock_exclusive()
            .map_err(|e| Error::Lock(format!("{}: {}", lock_path.display(), e)))?;

        let result = f();

        let _ = lock_file.unlock();

        result
    }
}

impl RecordStore for JsonlStore {
    fn insert(&self, mut pet: Pet) -> Result<Pet> {
        self.with_lock(|| {
            let mut pets = self.load_all()?;
            if pets.iter().any(|p| p.id == pet.id) {
                return Err(Error::AlreadyExists(pet.id.clone()));
            }

            let now = self.clock.now_millis();
            pet.created_at = now;
            pet.updated_at = now;
            pet.revision = 0;
            pet.validate()?;

            pets.push(pet.clone());
            self.save_all(&pets)?;
            tracing::debug!(id = %pet.id, "inserted pet record");
            Ok(pet)
        })
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Pet>> {
        let mut found = None;
        self.scan(|pet| {
            if pet.id == id {
                found = Some(pet);
                true
            } else {
                false
            }
        })?;
        Ok(found)
    }

    fn find(&self, filter: &PetFilter) -> Result<Vec<Pet>> {
        Ok(select(self.load_all()?, filter))
    }

    fn replace(&self, mut pet: Pet, expected_revision: u64) -> Result<Pet> {
        self.with_lock(|| {
            let mut pets = self.load_all()?;
            let pos = pets
                .iter()
                .position(|p| p.id == pet.id)
                .ok_or_else(|| Error::NotFound(pet.id.clone()))?;
            check_revision(&pets[pos], expected_revision)?;

            pet.created_at = pets[pos].created_at;
            pet.updated_at = self.clock.now_millis();
            pet.revision = expected_revision + 1;
            pet.validate()?;

            pets[pos] = pet.clone();
            self.save_all(&pets)?;
            tracing::debug!(id = %pet.id, revision = pet.revision, "replaced pet record");
            Ok(pet)
        })
    }

    fn delete(&self, id: &str, expected_revision: u64) -> Result<()> {
        self.with_lock(|| {
            let mut pets = self.load_all()?;
            let pos = pets
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            check_revision(&pets[pos], expected_revision)?;

            pets.remove(pos);
            self.save_all(&pets)?;
            tracing::debug!(id, "deleted pet record");
            Ok(())
        })
    }
}
