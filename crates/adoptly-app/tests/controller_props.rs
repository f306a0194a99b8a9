// Rust guideline compliant 2026-10-16

//! Property-based tests for create validation and guards.

use adoptly_app::{AdoptionController, AppError, ErrorCode, PetFields, StaticIdentityProvider};
use adoptly_core::{Field, MemoryStore, Principal};
use proptest::prelude::*;

fn controller() -> AdoptionController<MemoryStore, StaticIdentityProvider> {
    let mut identity = StaticIdentityProvider::new();
    for (token, id) in [("owner", "o1"), ("adopter", "p1")] {
        identity.insert(
            token,
            Principal {
                id: id.to_string(),
                name: id.to_uppercase(),
                image: None,
                phone: "555-0100".to_string(),
            },
        );
    }
    AdoptionController::new(MemoryStore::new(), identity)
}

fn arb_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("   ".to_string())),
        "[a-z]{1,12}".prop_map(Some),
    ]
}

prop_compose! {
    fn arb_fields()(
        name in arb_text(),
        age in prop::option::of(0u32..30),
        weight in prop::option::of(prop_oneof![Just(0.0f64), 0.1f64..80.0]),
        color in arb_text(),
    ) -> PetFields {
        PetFields { name, age, weight, color, available: None }
    }
}

/// Mirrors the field order the controller checks in.
fn expected_violation(fields: &PetFields, images: &[String]) -> Option<Field> {
    let blank = |text: &Option<String>| text.as_deref().map_or(true, |t| t.trim().is_empty());
    if blank(&fields.name) {
        Some(Field::Name)
    } else if fields.age.map_or(true, |age| age == 0) {
        Some(Field::Age)
    } else if fields.weight.map_or(true, |weight| weight <= 0.0) {
        Some(Field::Weight)
    } else if blank(&fields.color) {
        Some(Field::Color)
    } else if images.is_empty() {
        Some(Field::Images)
    } else {
        None
    }
}

proptest! {
    #[test]
    fn create_reports_first_violation(fields in arb_fields(), with_image in any::<bool>()) {
        let controller = controller();
        let images: Vec<String> = if with_image { vec!["a.jpg".to_string()] } else { Vec::new() };
        let expected = expected_violation(&fields, &images);

        match (controller.create("owner", fields, images.clone()), expected) {
            (Ok(pet), None) => {
                prop_assert!(pet.available);
                prop_assert!(pet.adopter.is_none());
                prop_assert_eq!(pet.images, images);
            }
            (Err(AppError::Validation { field }), Some(expected)) => {
                prop_assert_eq!(field, expected);
            }
            (other, expected) => {
                prop_assert!(false, "unexpected outcome {:?} for {:?}", other, expected);
            }
        }
    }

    #[test]
    fn owner_schedule_never_sets_adopter(name in "[a-z]{1,12}") {
        let controller = controller();
        let fields = PetFields {
            name: Some(name),
            age: Some(2),
            weight: Some(4.5),
            color: Some("black".to_string()),
            available: None,
        };
        let pet = controller.create("owner", fields, vec!["a.jpg".to_string()]).unwrap();

        let result = controller.schedule("owner", &pet.id);
        prop_assert_eq!(result.map_err(|e| e.code()).err(), Some(ErrorCode::Conflict));
        prop_assert!(controller.get_by_id(&pet.id).unwrap().adopter.is_none());
    }
}
