// Rust guideline compliant 2026-10-16

//! Unit tests for the record stores.
//!
//! These tests validate specific examples, edge cases, and error conditions.

use adoptly_core::{
    Error, JsonlStore, ManualClock, MemoryStore, OwnerSnapshot, Pet, PetFilter, RecordStore,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a test Pet.
fn create_test_pet(id: &str, owner: &str) -> Pet {
    Pet {
        id: id.to_string(),
        name: "Rex".to_string(),
        age: 3,
        weight: 12.0,
        color: "brown".to_string(),
        images: vec!["a.jpg".to_string()],
        available: true,
        owner: OwnerSnapshot {
            id: owner.to_string(),
            name: "Olivia".to_string(),
            image: None,
            phone: "555-0100".to_string(),
        },
        adopter: None,
        created_at: 0,
        updated_at: 0,
        revision: 0,
    }
}

fn jsonl_store(temp_dir: &TempDir, clock: Arc<ManualClock>) -> JsonlStore {
    JsonlStore::with_clock(temp_dir.path().join("pets.jsonl"), clock)
        .expect("Failed to create store")
}

#[test]
fn test_empty_file_handling() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonlStore::new(temp_dir.path().join("pets.jsonl")).expect("store");

    assert!(store.load_all().expect("load").is_empty());
    assert!(store
        .find_by_id("aaaaaaaaaaaaaaaaaaaaaaaa")
        .expect("find")
        .is_none());
}

#[test]
fn test_empty_path_rejected() {
    assert!(JsonlStore::new(std::path::PathBuf::new()).is_err());
}

#[test]
fn test_insert_stamps_store_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(5_000));
    let store = jsonl_store(&temp_dir, clock);

    let mut pet = create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1");
    pet.revision = 9;
    pet.created_at = 1;
    let stored = store.insert(pet).expect("insert");

    assert_eq!(stored.created_at, 5_000);
    assert_eq!(stored.updated_at, 5_000);
    assert_eq!(stored.revision, 0);

    let loaded = store
        .find_by_id("aaaaaaaaaaaaaaaaaaaaaaaa")
        .expect("find")
        .expect("present");
    assert_eq!(loaded, stored);
}

#[test]
fn test_duplicate_insert_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = jsonl_store(&temp_dir, Arc::new(ManualClock::new(1)));

    store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");
    let result = store.insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o2"));
    assert!(matches!(result, Err(Error::AlreadyExists(_))));
}

#[test]
fn test_invalid_pet_not_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = jsonl_store(&temp_dir, Arc::new(ManualClock::new(1)));

    let mut pet = create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1");
    pet.images.clear();
    assert!(matches!(store.insert(pet), Err(Error::InvalidPet(_))));
    assert!(store.load_all().expect("load").is_empty());
}

#[test]
fn test_replace_increments_revision_and_keeps_created_at() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(1_000));
    let store = jsonl_store(&temp_dir, clock.clone());

    let stored = store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");

    clock.advance(500);
    let mut changed = stored.clone();
    changed.name = "Max".to_string();
    changed.created_at = 0;
    let replaced = store.replace(changed, stored.revision).expect("replace");

    assert_eq!(replaced.revision, 1);
    assert_eq!(replaced.created_at, 1_000);
    assert_eq!(replaced.updated_at, 1_500);
    assert_eq!(replaced.name, "Max");
}

#[test]
fn test_stale_replace_rejected_and_record_unchanged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = jsonl_store(&temp_dir, Arc::new(ManualClock::new(1)));

    let stored = store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");

    let mut first = stored.clone();
    first.color = "black".to_string();
    store.replace(first, 0).expect("first writer wins");

    let mut second = stored;
    second.color = "white".to_string();
    let result = store.replace(second, 0);
    assert!(matches!(
        result,
        Err(Error::RevisionConflict {
            expected: 0,
            actual: 1,
            ..
        })
    ));

    let loaded = store
        .find_by_id("aaaaaaaaaaaaaaaaaaaaaaaa")
        .expect("find")
        .expect("present");
    assert_eq!(loaded.color, "black");
}

#[test]
fn test_delete_missing_and_stale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = jsonl_store(&temp_dir, Arc::new(ManualClock::new(1)));

    assert!(matches!(
        store.delete("aaaaaaaaaaaaaaaaaaaaaaaa", 0),
        Err(Error::NotFound(_))
    ));

    let stored = store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");
    assert!(matches!(
        store.delete(&stored.id, 3),
        Err(Error::RevisionConflict { .. })
    ));

    store.delete(&stored.id, 0).expect("delete");
    assert!(store.find_by_id(&stored.id).expect("find").is_none());
}

#[test]
fn test_malformed_json_line_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("pets.jsonl");
    let store = JsonlStore::new(path.clone()).expect("store");

    let good = serde_json::to_string(&create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("serialize");
    let other = serde_json::to_string(&create_test_pet("bbbbbbbbbbbbbbbbbbbbbbbb", "o1"))
        .expect("serialize");
    fs::write(&path, format!("{good}\n{{not json\n{other}\n")).expect("write");

    let pets = store.load_all().expect("load");
    assert_eq!(pets.len(), 2);
    assert!(store
        .find_by_id("bbbbbbbbbbbbbbbbbbbbbbbb")
        .expect("find")
        .is_some());
}

#[test]
fn test_invalid_record_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("pets.jsonl");
    let store = JsonlStore::new(path.clone()).expect("store");

    let good = serde_json::to_string(&create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("serialize");
    let mut weightless = create_test_pet("bbbbbbbbbbbbbbbbbbbbbbbb", "o1");
    weightless.weight = 0.0;
    let bad = serde_json::to_string(&weightless).expect("serialize");
    fs::write(&path, format!("{good}\n{bad}\n")).expect("write");

    let pets = store.find(&PetFilter::all()).expect("find");
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].id, "aaaaaaaaaaaaaaaaaaaaaaaa");
    assert!(store
        .find_by_id("bbbbbbbbbbbbbbbbbbbbbbbb")
        .expect("find")
        .is_none());
}

#[test]
fn test_find_by_filter_newest_first() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(300));
    let store = jsonl_store(&temp_dir, clock.clone());

    store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");
    clock.set(100);
    store
        .insert(create_test_pet("bbbbbbbbbbbbbbbbbbbbbbbb", "o2"))
        .expect("insert");
    clock.set(200);
    store
        .insert(create_test_pet("cccccccccccccccccccccccc", "o1"))
        .expect("insert");

    let all: Vec<String> = store
        .find(&PetFilter::all())
        .expect("find")
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(
        all,
        vec![
            "aaaaaaaaaaaaaaaaaaaaaaaa",
            "cccccccccccccccccccccccc",
            "bbbbbbbbbbbbbbbbbbbbbbbb"
        ]
    );

    let owned = store.find(&PetFilter::by_owner("o1")).expect("find");
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].id, "aaaaaaaaaaaaaaaaaaaaaaaa");
}

#[test]
fn test_lock_is_reacquirable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = jsonl_store(&temp_dir, Arc::new(ManualClock::new(1)));

    let result = store.with_lock(|| store.load_all());
    assert!(result.is_ok(), "Lock operation should succeed");

    let result2 = store.with_lock(|| store.load_all());
    assert!(result2.is_ok(), "Lock should be released and reacquirable");
}

#[test]
fn test_memory_store_matches_file_semantics() {
    let clock = Arc::new(ManualClock::new(10));
    let store = MemoryStore::with_clock(clock);

    let stored = store
        .insert(create_test_pet("aaaaaaaaaaaaaaaaaaaaaaaa", "o1"))
        .expect("insert");
    assert_eq!(stored.created_at, 10);
    assert_eq!(store.len().expect("len"), 1);

    let replaced = store.replace(stored.clone(), 0).expect("replace");
    assert_eq!(replaced.revision, 1);
    assert!(matches!(
        store.replace(stored.clone(), 0),
        Err(Error::RevisionConflict { .. })
    ));

    store.delete(&stored.id, 1).expect("delete");
    assert!(store.is_empty().expect("is_empty"));
}
