//! People use-case service.
//!
//! # Responsibility
//! - Provide the CRUD and finder entry points used by the HTTP layer.
//! - Turn a missing single-entity fetch into `ServiceError::NotFound`.
//!
//! # Invariants
//! - Writes are validated before the repository is called.
//! - The service never bypasses the repository contract.

use crate::model::person::{Person, PersonId, PersonInput, PersonValidationError};
use crate::repo::person_repo::{PersonRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for people use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target person does not exist.
    NotFound(PersonId),
    /// Input failed field validation.
    Invalid(PersonValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

impl From<PersonValidationError> for ServiceError {
    fn from(value: PersonValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Single finder selection for people search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonQuery {
    FullName(String),
    Hobby(String),
    FullNameStartingWith(String),
    HobbyStartingWith(String),
}

impl PersonQuery {
    fn kind(&self) -> &'static str {
        match self {
            Self::FullName(_) => "full_name",
            Self::Hobby(_) => "hobby",
            Self::FullNameStartingWith(_) => "full_name_prefix",
            Self::HobbyStartingWith(_) => "hobby_prefix",
        }
    }
}

/// People service facade over a repository implementation.
pub struct PeopleService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PeopleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every person in store order.
    pub fn find_all(&self) -> ServiceResult<Vec<Person>> {
        Ok(self.repo.find_all()?)
    }

    /// Returns one person or `ServiceError::NotFound`.
    pub fn find_one(&self, id: PersonId) -> ServiceResult<Person> {
        self.repo.find_by_id(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Runs exactly one finder; zero matches is an empty list.
    pub fn search(&self, query: &PersonQuery) -> ServiceResult<Vec<Person>> {
        let people = match query {
            PersonQuery::FullName(name) => self.repo.find_by_full_name(name)?,
            PersonQuery::Hobby(hobby) => self.repo.find_by_hobby(hobby)?,
            PersonQuery::FullNameStartingWith(prefix) => {
                self.repo.find_by_full_name_starting_with(prefix)?
            }
            PersonQuery::HobbyStartingWith(prefix) => {
                self.repo.find_by_hobby_starting_with(prefix)?
            }
        };
        info!(
            "event=person_search module=service status=ok query={} matches={}",
            query.kind(),
            people.len()
        );
        Ok(people)
    }

    /// Validates and stores a new person, returning the assigned id.
    pub fn save(&self, input: &PersonInput) -> ServiceResult<PersonId> {
        input.validate()?;
        let id = self.repo.save(input)?;
        info!("event=person_create module=service status=ok person_id={id}");
        Ok(id)
    }

    /// Validates and replaces all writable fields of `id`.
    pub fn update(&self, id: PersonId, input: &PersonInput) -> ServiceResult<()> {
        input.validate()?;
        self.repo.update(id, input)?;
        info!("event=person_update module=service status=ok person_id={id}");
        Ok(())
    }

    /// Removes `id`; a missing record is not an error.
    pub fn delete(&self, id: PersonId) -> ServiceResult<()> {
        if self.repo.delete(id)? {
            info!("event=person_delete module=service status=ok person_id={id}");
        } else {
            warn!("event=person_delete module=service status=noop person_id={id} reason=not_found");
        }
        Ok(())
    }
}
