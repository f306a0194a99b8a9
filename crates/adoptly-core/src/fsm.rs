// Rust guideline compliant 2026-10-16

//! Finite State Machine module for the listing lifecycle.
//!
//! A listing's three flags collapse into one of three states:
//!
//! - Listed: available, no adopter
//! - VisitScheduled: available, adopter recorded
//! - Adopted: no longer available (terminal)
//!
//! Schedule, update and remove are only valid before adoption. Conclude is
//! valid from every state; on an adopted listing it is a no-op.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    /// Open listing with no visit booked.
    Listed,
    /// Open listing with a recorded adopter.
    VisitScheduled,
    /// Adoption concluded.
    Adopted,
}

/// Operations that act on an existing listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Book a visit as a would-be adopter.
    Schedule,
    /// Mark the pet as adopted.
    Conclude,
    /// Replace the descriptive fields.
    Update,
    /// Delete the listing.
    Remove,
}

impl ListingState {
    /// Returns true if no further state change is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ListingState::Adopted)
    }

    /// Checks if `transition` may be applied in this state.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTransition` for schedule, update or remove on
    /// an adopted listing.
    pub fn can_apply(&self, transition: Transition) -> Result<()> {
        match (self, transition) {
            (_, Transition::Conclude) => Ok(()),
            (ListingState::Adopted, other) => Err(Error::InvalidTransition(format!(
                "Cannot {} a pet that has already been adopted",
                other
            ))),
            _ => Ok(()),
        }
    }

    /// Returns the transitions accepted in this state.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Transition> {
        match self {
            ListingState::Adopted => vec![Transition::Conclude],
            ListingState::Listed | ListingState::VisitScheduled => vec![
                Transition::Schedule,
                Transition::Conclude,
                Transition::Update,
                Transition::Remove,
            ],
        }
    }
}

impl fmt::Display for ListingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ListingState::Listed => "listed",
            ListingState::VisitScheduled => "visit_scheduled",
            ListingState::Adopted => "adopted",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Transition::Schedule => "schedule",
            Transition::Conclude => "conclude",
            Transition::Update => "update",
            Transition::Remove => "remove",
        };
        f.write_str(label)
    }
}
