// Rust guideline compliant 2026-10-16

//! Core data models for Adoptly.

use crate::fsm::ListingState;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static ID_NONCE: AtomicU32 = AtomicU32::new(0);

/// An authenticated actor resolved from a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable principal identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional profile image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Contact phone number.
    pub phone: String,
}

impl Principal {
    /// Captures the owner snapshot stored on a new listing.
    #[must_use]
    pub fn owner_snapshot(&self) -> OwnerSnapshot {
        OwnerSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Captures the adopter snapshot stored when a visit is scheduled.
    #[must_use]
    pub fn adopter_snapshot(&self) -> AdopterSnapshot {
        AdopterSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// Owner profile copied into a listing at creation time.
///
/// Never refreshed from the identity provider: a later profile edit leaves
/// existing listings untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSnapshot {
    /// Owner principal ID.
    pub id: String,
    /// Owner display name at creation time.
    pub name: String,
    /// Owner image at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Owner contact phone at creation time.
    pub phone: String,
}

/// Adopter profile copied into a listing when a visit is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterSnapshot {
    /// Adopter principal ID.
    pub id: String,
    /// Adopter display name at scheduling time.
    pub name: String,
    /// Adopter image at scheduling time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Input fields that are validated individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Pet name.
    Name,
    /// Pet age in years.
    Age,
    /// Pet weight in kilograms.
    Weight,
    /// Pet coat color.
    Color,
    /// Image references.
    Images,
    /// Availability flag.
    Available,
}

impl Field {
    /// Returns the field name as used in requests and error payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Weight => "weight",
            Field::Color => "color",
            Field::Images => "images",
            Field::Available => "available",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive attributes required on create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct PetDetails {
    /// Pet name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Coat color.
    pub color: String,
}

/// A Pet is a single adoption listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Hash-based identifier (24 lowercase hex characters).
    pub id: String,
    /// Pet name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Coat color.
    pub color: String,
    /// Blob references, in upload order.
    pub images: Vec<String>,
    /// True while the listing is open; flips to false once, on adoption.
    pub available: bool,
    /// Owner snapshot taken at creation.
    pub owner: OwnerSnapshot,
    /// Adopter snapshot, set by the first successful schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopter: Option<AdopterSnapshot>,
    /// Unix milliseconds of insertion, set by the store.
    #[serde(default)]
    pub created_at: i64,
    /// Unix milliseconds of the last write, set by the store.
    #[serde(default)]
    pub updated_at: i64,
    /// Write counter used for compare-and-swap, maintained by the store.
    #[serde(default)]
    pub revision: u64,
}

impl Pet {
    /// Creates a new open listing owned by `owner`.
    ///
    /// # Arguments
    ///
    /// * `details` - Validated descriptive attributes
    /// * `images` - Blob references, at least one
    /// * `owner` - The creating principal
    ///
    /// # Returns
    ///
    /// A new Pet with `available = true`, no adopter and store-managed
    /// fields zeroed until it is inserted.
    pub fn new(details: PetDetails, images: Vec<String>, owner: &Principal) -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let nonce = ID_NONCE.fetch_add(1, Ordering::Relaxed);
        let id = crate::identity::generate_id(&details.name, &owner.id, nanos, nonce);

        Self {
            id,
            name: details.name,
            age: details.age,
            weight: details.weight,
            color: details.color,
            images,
            available: true,
            owner: owner.owner_snapshot(),
            adopter: None,
            created_at: 0,
            updated_at: 0,
            revision: 0,
        }
    }

    /// Returns the collapsed lifecycle state of this listing.
    #[must_use]
    pub fn state(&self) -> ListingState {
        if !self.available {
            ListingState::Adopted
        } else if self.adopter.is_some() {
            ListingState::VisitScheduled
        } else {
            ListingState::Listed
        }
    }

    /// Returns true if `principal_id` owns this listing.
    #[must_use]
    pub fn is_owned_by(&self, principal_id: &str) -> bool {
        self.owner.id == principal_id
    }

    /// Returns true if `principal_id` is the recorded adopter.
    #[must_use]
    pub fn is_adopted_by(&self, principal_id: &str) -> bool {
        self.adopter
            .as_ref()
            .is_some_and(|adopter| adopter.id == principal_id)
    }

    /// Overwrites the descriptive attributes.
    pub fn apply_details(&mut self, details: PetDetails) {
        self.name = details.name;
        self.age = details.age;
        self.weight = details.weight;
        self.color = details.color;
    }

    /// Validates the Pet data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - ID format is invalid
    /// - A descriptive attribute is missing or out of range
    /// - Images are empty or contain a blank reference
    /// - The owner snapshot is incomplete
    /// - The adopter is the owner
    pub fn validate(&self) -> Result<()> {
        crate::identity::validate_id_format(&self.id)?;

        if self.name.trim().is_empty() {
            return Err(Error::InvalidPet("Name cannot be empty".to_string()));
        }
        if self.age == 0 {
            return Err(Error::InvalidPet("Age must be positive".to_string()));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(Error::InvalidPet(format!(
                "Weight must be a positive number, got {}",
                self.weight
            )));
        }
        if self.color.trim().is_empty() {
            return Err(Error::InvalidPet("Color cannot be empty".to_string()));
        }

        if self.images.is_empty() {
            return Err(Error::InvalidPet(
                "A pet needs at least one image".to_string(),
            ));
        }
        if self.images.iter().any(|image| image.trim().is_empty()) {
            return Err(Error::InvalidPet(
                "Image reference cannot be empty".to_string(),
            ));
        }

        if self.owner.id.trim().is_empty() || self.owner.name.trim().is_empty() {
            return Err(Error::InvalidPet(
                "Owner snapshot is incomplete".to_string(),
            ));
        }

        if let Some(adopter) = &self.adopter {
            if adopter.id.trim().is_empty() {
                return Err(Error::InvalidPet(
                    "Adopter ID cannot be empty".to_string(),
                ));
            }
            if adopter.id == self.owner.id {
                return Err(Error::InvalidPet(
                    "Owner cannot be the adopter".to_string(),
                ));
            }
        }

        Ok(())
    }
}
