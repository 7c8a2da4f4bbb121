//! Domain model for the people registry.
//!
//! # Responsibility
//! - Define the canonical `Person` record and its write-side input shape.
//! - Own the field constraints every write must satisfy.
//!
//! # Invariants
//! - Every stored person is identified by a store-assigned `PersonId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod person;
