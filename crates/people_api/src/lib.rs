//! HTTP surface for the people registry.
//!
//! # Responsibility
//! - Route `/people` requests to `PeopleService` use-cases.
//! - Render failures as `{message, timestamp}` bodies.
//!
//! # Invariants
//! - Mutations are validated before reaching the store.
//! - Successful mutations answer `200` with an empty body.

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorResponse, NOT_FOUND_MESSAGE};
pub use routes::{build_router, SearchParams, SharedService};
