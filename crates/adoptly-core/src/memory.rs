// Rust guideline compliant 2026-10-16

//! In-memory record store.

use crate::clock::{Clock, SystemClock};
use crate::storage::{check_revision, select, PetFilter, RecordStore};
use crate::{Error, Pet, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// Record store held in process memory.
///
/// A single mutex covers each read-check-write, giving the same
/// compare-and-swap semantics as the file store.
pub struct MemoryStore {
    pets: Mutex<Vec<Pet>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store using `clock` for timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            pets: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store mutex is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns true if no records are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Pet>>> {
        self.pets
            .lock()
            .map_err(|_| Error::Lock("memory store mutex poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, mut pet: Pet) -> Result<Pet> {
        let mut pets = self.lock()?;
        if pets.iter().any(|p| p.id == pet.id) {
            return Err(Error::AlreadyExists(pet.id));
        }

        let now = self.clock.now_millis();
        pet.created_at = now;
        pet.updated_at = now;
        pet.revision = 0;
        pet.validate()?;

        pets.push(pet.clone());
        Ok(pet)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Pet>> {
        Ok(self.lock()?.iter().find(|p| p.id == id).cloned())
    }

    fn find(&self, filter: &PetFilter) -> Result<Vec<Pet>> {
        let snapshot = self.lock()?.clone();
        Ok(select(snapshot, filter))
    }

    fn replace(&self, mut pet: Pet, expected_revision: u64) -> Result<Pet> {
        let mut pets = self.lock()?;
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
        Ok(pet)
    }

    fn delete(&self, id: &str, expected_revision: u64) -> Result<()> {
        let mut pets = self.lock()?;
        let pos = pets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        check_revision(&pets[pos], expected_revision)?;
        pets.remove(pos);
        Ok(())
    }
}
