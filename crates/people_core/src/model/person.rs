//! Person domain model and field validation.
//!
//! # Responsibility
//! - Define the `Person` record and the `PersonInput` accepted on writes.
//! - Validate inputs into an ordered list of per-field violations.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - Violations are reported in field order `fullName`, `age`, `email`,
//!   with at most one violation per field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a person.
pub type PersonId = i64;

const FULL_NAME_MIN_CHARS: usize = 2;
const FULL_NAME_MAX_CHARS: usize = 100;

static FULL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}\p{L}+(?: \p{Lu}\p{L}+)+$").expect("valid full name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});

/// Persisted person record as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    /// "Name Surname", optionally followed by more capitalized words.
    pub full_name: String,
    pub age: i32,
    pub email: String,
    pub hobby: Option<String>,
}

impl Person {
    /// Builds a person from a store-assigned id and the written input.
    pub fn from_input(id: PersonId, input: PersonInput) -> Self {
        Self {
            id,
            full_name: input.full_name,
            age: input.age,
            email: input.email,
            hobby: input.hobby,
        }
    }
}

/// Write-side shape of a person: every field except the store-assigned id.
///
/// Missing JSON fields fall back to empty defaults so they surface as
/// validation violations instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInput {
    pub full_name: String,
    pub age: i32,
    pub email: String,
    pub hobby: Option<String>,
}

impl PersonInput {
    pub fn new(
        full_name: impl Into<String>,
        age: i32,
        email: impl Into<String>,
        hobby: Option<&str>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            age,
            email: email.into(),
            hobby: hobby.map(str::to_owned),
        }
    }

    /// Checks every field constraint and returns all violations at once.
    ///
    /// # Errors
    /// - Returns `PersonValidationError` with at least one violation when any
    ///   field is invalid.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        let violations = [
            ("fullName", full_name_violation(&self.full_name)),
            ("age", age_violation(self.age)),
            ("email", email_violation(&self.email)),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| FieldViolation { field, message }))
        .collect::<Vec<_>>();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PersonValidationError { violations })
        }
    }
}

fn full_name_violation(full_name: &str) -> Option<&'static str> {
    if full_name.trim().is_empty() {
        return Some("Name should not be empty");
    }
    let chars = full_name.chars().count();
    if !(FULL_NAME_MIN_CHARS..=FULL_NAME_MAX_CHARS).contains(&chars) {
        return Some("Name should be between 2 and 100 characters");
    }
    if !FULL_NAME_RE.is_match(full_name) {
        return Some("Name should be in the format: Name Surname");
    }
    None
}

fn age_violation(age: i32) -> Option<&'static str> {
    (age <= 0).then_some("Age should be greater than 0")
}

fn email_violation(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        return Some("Email should not be empty");
    }
    if !EMAIL_RE.is_match(email) {
        return Some("Email should be valid");
    }
    None
}

/// One failed constraint on one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field (`fullName`, `age`, `email`).
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {};", self.field, self.message)
    }
}

/// Validation failure carrying every violated field constraint in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonValidationError {
    violations: Vec<FieldViolation>,
}

impl PersonValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether `field` has a violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field)
    }
}

/// Renders as `"<field> - <message>;"` for every violation, concatenated.
impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.violations
            .iter()
            .try_for_each(|violation| write!(f, "{violation}"))
    }
}

impl Error for PersonValidationError {}
