//! Repository layer: data access contracts and SQLite persistence.
//!
//! # Responsibility
//! - Define the typed query surface over the people collection.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `PersonInput::validate()` before persistence.
//! - Finders signal "no match" with an empty result, never an error.

pub mod person_repo;
