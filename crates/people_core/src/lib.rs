//! Core domain logic for the people registry.
//! This crate owns the Person invariants and every read/write of the store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::person::{
    FieldViolation, Person, PersonId, PersonInput, PersonValidationError,
};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::people_service::{PeopleService, PersonQuery, ServiceError, ServiceResult};

/// Minimal health-check API used by the HTTP probe.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
