// Rust guideline compliant 2026-10-16

//! Adoption lifecycle controller.
//!
//! Each operation resolves the acting principal, loads the pet, checks the
//! guards and writes the result back with a revision check. The controller
//! keeps no state between calls.

use crate::error::{AppError, Result};
use crate::identity::IdentityProvider;
use adoptly_core::{
    identity, AdopterPolicy, Config, Field, ListingState, Pet, PetDetails, PetFilter, Principal,
    RecordStore, Transition,
};
use serde::{Deserialize, Serialize};

/// Request fields for create and update.
///
/// Everything is optional at this layer so that missing fields can be
/// reported one at a time, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetFields {
    /// Pet name.
    pub name: Option<String>,
    /// Age in whole years.
    pub age: Option<u32>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Coat color.
    pub color: Option<String>,
    /// Availability; required on update, ignored on create.
    pub available: Option<bool>,
}

impl PetFields {
    /// Validates name, age, weight and color in that order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first missing field.
    pub fn details(&self) -> Result<PetDetails> {
        let name = required_text(self.name.as_deref(), Field::Name)?;

        let age = match self.age {
            Some(age) if age > 0 => age,
            _ => return Err(AppError::missing(Field::Age)),
        };

        let weight = match self.weight {
            Some(weight) if weight.is_finite() && weight > 0.0 => weight,
            _ => return Err(AppError::missing(Field::Weight)),
        };

        let color = required_text(self.color.as_deref(), Field::Color)?;

        Ok(PetDetails {
            name,
            age,
            weight,
            color,
        })
    }
}

fn required_text(value: Option<&str>, field: Field) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::missing(field)),
    }
}

/// Result of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    /// Human-readable message.
    pub message: String,
    /// The pet acted on.
    pub pet_id: String,
    /// Lifecycle state after the operation; `None` once removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ListingState>,
}

impl Confirmation {
    fn new(message: impl Into<String>, pet_id: &str, state: Option<ListingState>) -> Self {
        Self {
            message: message.into(),
            pet_id: pet_id.to_string(),
            state,
        }
    }
}

/// Drives pets through their lifecycle on top of a record store.
pub struct AdoptionController<S, I> {
    store: S,
    identity: I,
    policy: AdopterPolicy,
    max_images: usize,
}

impl<S: RecordStore, I: IdentityProvider> AdoptionController<S, I> {
    /// Creates a controller with default policy and limits.
    pub fn new(store: S, identity: I) -> Self {
        let defaults = Config::default();
        Self::from_config(store, identity, &defaults)
    }

    /// Creates a controller using the policy and limits in `config`.
    pub fn from_config(store: S, identity: I, config: &Config) -> Self {
        Self {
            store,
            identity,
            policy: config.adopter_policy,
            max_images: config.max_images,
        }
    }

    /// Overrides the multi-adopter policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AdopterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the acting principal for `credential`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` if the credential is not accepted.
    pub fn authenticate(&self, credential: &str) -> Result<Principal> {
        self.identity.resolve(credential).map_err(|err| {
            tracing::warn!("rejected credential");
            err
        })
    }

    /// Lists a new pet owned by the caller.
    ///
    /// # Arguments
    ///
    /// * `credential` - Caller credential
    /// * `fields` - Descriptive fields; `available` is ignored
    /// * `images` - Blob references from the blob store
    ///
    /// # Returns
    ///
    /// The stored record, `available = true` and no adopter.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is not accepted
    /// - name, age, weight, color or images is missing (first one reported)
    /// - The store write fails
    pub fn create(&self, credential: &str, fields: PetFields, images: Vec<String>) -> Result<Pet> {
        let principal = self.authenticate(credential)?;

        let details = fields.details()?;
        self.check_images(&images, true)?;

        let pet = Pet::new(details, images, &principal);
        let stored = self.store.insert(pet).map_err(|err| {
            tracing::error!(owner_id = %principal.id, error = %err, "failed to store new pet");
            AppError::from_write(err)
        })?;

        tracing::info!(pet_id = %stored.id, owner_id = %principal.id, "pet listed");
        Ok(stored)
    }

    /// Runs the create guards without writing anything.
    ///
    /// Front ends call this before storing image blobs.
    ///
    /// # Errors
    ///
    /// Returns the error `create` would report before its write.
    pub fn check_create(
        &self,
        credential: &str,
        fields: &PetFields,
        image_count: usize,
    ) -> Result<()> {
        self.authenticate(credential)?;
        fields.details()?;
        self.check_image_count(image_count, true)
    }

    /// Returns every pet, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn get_all(&self) -> Result<Vec<Pet>> {
        self.browse(None)
    }

    /// Returns pets filtered by availability, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn browse(&self, available: Option<bool>) -> Result<Vec<Pet>> {
        let filter = PetFilter {
            available,
            ..PetFilter::all()
        };
        self.store.find(&filter).map_err(AppError::from_read)
    }

    /// Returns the caller's own listings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is not accepted or the store
    /// cannot be read.
    pub fn get_by_owner(&self, credential: &str) -> Result<Vec<Pet>> {
        let principal = self.authenticate(credential)?;
        self.store
            .find(&PetFilter::by_owner(principal.id))
            .map_err(AppError::from_read)
    }

    /// Returns the pets the caller is recorded as adopter of, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is not accepted or the store
    /// cannot be read.
    pub fn get_by_adopter(&self, credential: &str) -> Result<Vec<Pet>> {
        let principal = self.authenticate(credential)?;
        self.store
            .find(&PetFilter::by_adopter(principal.id))
            .map_err(AppError::from_read)
    }

    /// Loads one pet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a malformed ID, `NotFound` if no
    /// record matches, or an error if the store cannot be read.
    pub fn get_by_id(&self, id: &str) -> Result<Pet> {
        let id = identity::normalize_id(id).map_err(|_| AppError::InvalidIdentifier(id.to_string()))?;
        self.store
            .find_by_id(&id)
            .map_err(AppError::from_read)?
            .ok_or(AppError::NotFound(id))
    }

    /// Deletes a listing. Owner only; adopted pets are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is not accepted
    /// - The ID is malformed or unknown
    /// - The caller is not the owner
    /// - The pet has been adopted
    /// - The store delete fails
    pub fn remove(&self, credential: &str, id: &str) -> Result<Confirmation> {
        let principal = self.authenticate(credential)?;
        let pet = self.get_by_id(id)?;

        self.require_owner(&pet, &principal, Transition::Remove)?;
        self.require_state(&pet, &principal, Transition::Remove)?;

        self.store.delete(&pet.id, pet.revision).map_err(|err| {
            tracing::error!(pet_id = %pet.id, error = %err, "failed to delete pet");
            AppError::from_write(err)
        })?;

        tracing::info!(pet_id = %pet.id, owner_id = %principal.id, "pet removed");
        Ok(Confirmation::new("Pet removed successfully", &pet.id, None))
    }

    /// Replaces the descriptive fields of a listing. Owner only.
    ///
    /// `available` must always be supplied and must be `true`: only
    /// `conclude_adoption` moves a pet to `Adopted`. Images are replaced only
    /// when a non-empty set is given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is not accepted
    /// - The ID is malformed or unknown
    /// - The caller is not the owner
    /// - The pet has been adopted
    /// - name, age, weight, color or available is missing (first one reported)
    /// - `available` is `false`
    /// - The write fails or loses a concurrent race
    pub fn update(
        &self,
        credential: &str,
        id: &str,
        fields: PetFields,
        images: Vec<String>,
    ) -> Result<Confirmation> {
        let principal = self.authenticate(credential)?;
        let (mut pet, details) = self.guard_update(&principal, id, &fields)?;
        self.check_images(&images, false)?;

        let revision = pet.revision;
        pet.apply_details(details);
        if !images.is_empty() {
            pet.images = images;
        }

        let stored = self.store.replace(pet, revision).map_err(|err| {
            tracing::error!(pet_id = %id, error = %err, "failed to update pet");
            AppError::from_write(err)
        })?;

        tracing::info!(
            pet_id = %stored.id,
            owner_id = %principal.id,
            state = %stored.state(),
            "pet updated"
        );
        Ok(Confirmation::new(
            "Pet updated successfully",
            &stored.id,
            Some(stored.state()),
        ))
    }

    /// Runs the update guards without writing anything.
    ///
    /// # Errors
    ///
    /// Returns the error `update` would report before its write.
    pub fn check_update(
        &self,
        credential: &str,
        id: &str,
        fields: &PetFields,
        image_count: usize,
    ) -> Result<()> {
        let principal = self.authenticate(credential)?;
        self.guard_update(&principal, id, fields)?;
        self.check_image_count(image_count, false)
    }

    /// Loads the pet and checks ownership, state and fields, in that order.
    fn guard_update(
        &self,
        principal: &Principal,
        id: &str,
        fields: &PetFields,
    ) -> Result<(Pet, PetDetails)> {
        let pet = self.get_by_id(id)?;

        self.require_owner(&pet, principal, Transition::Update)?;
        self.require_state(&pet, principal, Transition::Update)?;

        let details = fields.details()?;
        let available = fields.available.ok_or(AppError::missing(Field::Available))?;
        if !available {
            return Err(self.reject(
                &pet,
                principal,
                Transition::Update,
                AppError::Conflict(
                    "Availability only changes when the adoption is concluded".to_string(),
                ),
            ));
        }

        Ok((pet, details))
    }

    /// Books a visit: records the caller as adopter.
    ///
    /// The confirmation message carries the owner's name and phone so the
    /// caller can arrange the visit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is not accepted
    /// - The ID is malformed or unknown
    /// - The caller owns the pet
    /// - The caller already scheduled a visit for this pet
    /// - The pet has been adopted
    /// - Another adopter holds the pet under the exclusive policy
    /// - The write fails or loses a concurrent race
    pub fn schedule(&self, credential: &str, id: &str) -> Result<Confirmation> {
        let principal = self.authenticate(credential)?;
        let mut pet = self.get_by_id(id)?;

        if pet.is_owned_by(&principal.id) {
            return Err(self.reject(
                &pet,
                &principal,
                Transition::Schedule,
                AppError::Conflict("You cannot schedule a visit for your own pet".to_string()),
            ));
        }

        if pet.is_adopted_by(&principal.id) {
            return Err(self.reject(
                &pet,
                &principal,
                Transition::Schedule,
                AppError::Conflict("You have already scheduled a visit for this pet".to_string()),
            ));
        }

        self.require_state(&pet, &principal, Transition::Schedule)?;

        if let Some(current) = &pet.adopter {
            match self.policy {
                AdopterPolicy::Exclusive => {
                    return Err(self.reject(
                        &pet,
                        &principal,
                        Transition::Schedule,
                        AppError::Conflict(
                            "A visit has already been scheduled by another adopter".to_string(),
                        ),
                    ));
                }
                AdopterPolicy::Replace => {
                    tracing::info!(
                        pet_id = %pet.id,
                        previous_adopter = %current.id,
                        adopter_id = %principal.id,
                        "replacing recorded adopter"
                    );
                }
            }
        }

        let revision = pet.revision;
        pet.adopter = Some(principal.adopter_snapshot());

        let stored = self.store.replace(pet, revision).map_err(|err| {
            tracing::error!(pet_id = %id, error = %err, "failed to schedule visit");
            AppError::from_write(err)
        })?;

        tracing::info!(pet_id = %stored.id, adopter_id = %principal.id, "visit scheduled");
        Ok(Confirmation::new(
            format!(
                "Visit scheduled successfully! Contact {} at {}.",
                stored.owner.name, stored.owner.phone
            ),
            &stored.id,
            Some(stored.state()),
        ))
    }

    /// Marks the pet as adopted. Owner only; repeating it is a no-op.
    ///
    /// No adopter needs to be on record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is not accepted
    /// - The ID is malformed or unknown
    /// - The caller is not the owner
    /// - The write fails or loses a concurrent race
    pub fn conclude_adoption(&self, credential: &str, id: &str) -> Result<Confirmation> {
        let principal = self.authenticate(credential)?;
        let mut pet = self.get_by_id(id)?;

        self.require_owner(&pet, &principal, Transition::Conclude)?;
        self.require_state(&pet, &principal, Transition::Conclude)?;

        const MESSAGE: &str = "Congratulations, the adoption has been concluded!";

        if pet.state().is_terminal() {
            tracing::debug!(pet_id = %pet.id, "adoption already concluded");
            return Ok(Confirmation::new(MESSAGE, &pet.id, Some(ListingState::Adopted)));
        }

        let revision = pet.revision;
        pet.available = false;

        let stored = self.store.replace(pet, revision).map_err(|err| {
            tracing::error!(pet_id = %id, error = %err, "failed to conclude adoption");
            AppError::from_write(err)
        })?;

        tracing::info!(
            pet_id = %stored.id,
            owner_id = %principal.id,
            adopter_id = stored.adopter.as_ref().map(|a| a.id.as_str()).unwrap_or("-"),
            "adoption concluded"
        );
        Ok(Confirmation::new(MESSAGE, &stored.id, Some(stored.state())))
    }

    fn check_image_count(&self, count: usize, required: bool) -> Result<()> {
        if (required && count == 0) || count > self.max_images {
            return Err(AppError::missing(Field::Images));
        }
        Ok(())
    }

    fn check_images(&self, images: &[String], required: bool) -> Result<()> {
        self.check_image_count(images.len(), required)?;
        if images.iter().any(|image| image.trim().is_empty()) {
            return Err(AppError::missing(Field::Images));
        }
        Ok(())
    }

    fn require_owner(&self, pet: &Pet, principal: &Principal, transition: Transition) -> Result<()> {
        if pet.is_owned_by(&principal.id) {
            return Ok(());
        }
        Err(self.reject(
            pet,
            principal,
            transition,
            AppError::Forbidden("Only the owner can do this".to_string()),
        ))
    }

    fn require_state(&self, pet: &Pet, principal: &Principal, transition: Transition) -> Result<()> {
        pet.state().can_apply(transition).map_err(|err| {
            self.reject(pet, principal, transition, AppError::Conflict(err.to_string()))
        })
    }

    fn reject(
        &self,
        pet: &Pet,
        principal: &Principal,
        transition: Transition,
        err: AppError,
    ) -> AppError {
        tracing::warn!(
            pet_id = %pet.id,
            principal_id = %principal.id,
            transition = %transition,
            reason = %err,
            "guard rejected request"
        );
        err
    }
}
