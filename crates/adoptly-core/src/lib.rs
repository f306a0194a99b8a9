// Rust guideline compliant 2026-10-16

//! Adoptly Core Library
//!
//! This crate provides the foundational components for the Adoptly adoption service:
//! - Data models (Pet, owner/adopter snapshots, Principal)
//! - Listing lifecycle state machine
//! - Record stores (JSONL file store, in-memory store) with revision checks
//! - Hash ID generation and validation
//! - Configuration and error types

pub mod clock;
pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod memory;
pub mod models;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AdopterPolicy, Config, OutputFormat};
pub use error::{Error, Result};
pub use fsm::{ListingState, Transition};
pub use memory::MemoryStore;
pub use models::{AdopterSnapshot, Field, OwnerSnapshot, Pet, PetDetails, Principal};
pub use storage::{JsonlStore, PetFilter, RecordStore};
