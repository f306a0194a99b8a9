// Rust guideline compliant 2026-10-16

//! Property-based tests for store ordering and revision checks.

use adoptly_core::{
    Error, JsonlStore, ManualClock, MemoryStore, OwnerSnapshot, Pet, PetFilter, RecordStore,
};
use proptest::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn pet(index: usize, owner: &str) -> Pet {
    Pet {
        id: format!("{:024x}", index + 1),
        name: format!("Pet {index}"),
        age: 1,
        weight: 4.5,
        color: "grey".to_string(),
        images: vec![format!("{index}.jpg")],
        available: true,
        owner: OwnerSnapshot {
            id: owner.to_string(),
            name: "Owner".to_string(),
            image: None,
            phone: "555-0100".to_string(),
        },
        adopter: None,
        created_at: 0,
        updated_at: 0,
        revision: 0,
    }
}

fn assert_newest_first(pets: &[Pet]) {
    for pair in pets.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "{} created at {} listed before {} created at {}",
            pair[0].id,
            pair[0].created_at,
            pair[1].id,
            pair[1].created_at
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Listings come back newest first whatever order they were inserted in.
    #[test]
    fn prop_memory_store_orders_by_creation(
        times in prop::collection::vec(0i64..1_000, 1..40),
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let store = MemoryStore::with_clock(clock.clone());

        for (index, at) in times.iter().enumerate() {
            clock.set(*at);
            let owner = if index % 2 == 0 { "even" } else { "odd" };
            store.insert(pet(index, owner)).unwrap();
        }

        let all = store.find(&PetFilter::all()).unwrap();
        prop_assert_eq!(all.len(), times.len());
        assert_newest_first(&all);

        let even = store.find(&PetFilter::by_owner("even")).unwrap();
        prop_assert!(even.iter().all(|p| p.owner.id == "even"));
        prop_assert_eq!(even.len(), times.len().div_ceil(2));
        assert_newest_first(&even);
    }

    /// The JSONL store returns the same order as the memory store.
    #[test]
    fn prop_jsonl_store_orders_by_creation(
        times in prop::collection::vec(0i64..1_000, 1..12),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(0));
        let file_store =
            JsonlStore::with_clock(temp_dir.path().join("pets.jsonl"), clock.clone()).unwrap();
        let memory_store = MemoryStore::with_clock(clock.clone());

        for (index, at) in times.iter().enumerate() {
            clock.set(*at);
            file_store.insert(pet(index, "o1")).unwrap();
            memory_store.insert(pet(index, "o1")).unwrap();
        }

        let from_file: Vec<String> = file_store
            .find(&PetFilter::all())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        let from_memory: Vec<String> = memory_store
            .find(&PetFilter::all())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(from_file, from_memory);
    }

    /// Only a writer holding the current revision may replace a record.
    #[test]
    fn prop_replace_requires_current_revision(writes in 0u64..6, stale in 0u64..12) {
        let store = MemoryStore::with_clock(Arc::new(ManualClock::new(1)));
        let mut current = store.insert(pet(0, "o1")).unwrap();
        for _ in 0..writes {
            current = store.replace(current.clone(), current.revision).unwrap();
        }
        prop_assert_eq!(current.revision, writes);

        let result = store.replace(current.clone(), stale);
        if stale == writes {
            prop_assert_eq!(result.unwrap().revision, writes + 1);
        } else {
            let is_conflict = matches!(result, Err(Error::RevisionConflict { .. }));
            prop_assert!(is_conflict);
        }
    }
}
