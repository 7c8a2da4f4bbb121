//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide finders, save, update and delete over the `people` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `PersonInput::validate()` before SQL mutations.
//! - Read paths reject rows that do not decode instead of masking them.
//! - Every list result is ordered by ascending `id`.

use crate::db::DbError;
use crate::model::person::{Person, PersonId, PersonInput, PersonValidationError};
use rusqlite::{params, Connection, Row, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    age,
    email,
    hobby
FROM people";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for person persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PersonValidationError),
    Db(DbError),
    NotFound(PersonId),
    InvalidData(String),
    /// A previous holder of the connection panicked mid-operation.
    ConnectionPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::ConnectionPoisoned => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for the people collection.
///
/// Prefix finders are left-anchored and case-sensitive; exact finders use
/// equality.
pub trait PersonRepository {
    fn find_all(&self) -> RepoResult<Vec<Person>>;
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>>;
    fn find_by_full_name(&self, name: &str) -> RepoResult<Vec<Person>>;
    fn find_by_hobby(&self, hobby: &str) -> RepoResult<Vec<Person>>;
    fn find_by_full_name_starting_with(&self, prefix: &str) -> RepoResult<Vec<Person>>;
    fn find_by_hobby_starting_with(&self, prefix: &str) -> RepoResult<Vec<Person>>;
    /// Inserts a new person and returns the store-assigned id.
    fn save(&self, input: &PersonInput) -> RepoResult<PersonId>;
    /// Replaces every writable field of `id`. Fails with `NotFound` when absent.
    fn update(&self, id: PersonId, input: &PersonInput) -> RepoResult<()>;
    /// Removes `id` if present. Returns whether a row was removed.
    fn delete(&self, id: PersonId) -> RepoResult<bool>;
}

/// SQLite-backed person repository.
///
/// Owns its connection behind a mutex so one instance can serve concurrent
/// request handlers.
pub struct SqlitePersonRepository {
    conn: Mutex<Connection>,
}

impl SqlitePersonRepository {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::ConnectionPoisoned)
    }

    fn query_people(&self, filter: &str, args: &[&dyn ToSql]) -> RepoResult<Vec<Person>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(args)?;
        let mut people = Vec::new();

        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }
}

impl PersonRepository for SqlitePersonRepository {
    fn find_all(&self) -> RepoResult<Vec<Person>> {
        self.query_people("", params![])
    }

    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut people = self.query_people("WHERE id = ?1", params![id])?;
        Ok(people.pop())
    }

    fn find_by_full_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        self.query_people("WHERE full_name = ?1", params![name])
    }

    fn find_by_hobby(&self, hobby: &str) -> RepoResult<Vec<Person>> {
        self.query_people("WHERE hobby = ?1", params![hobby])
    }

    fn find_by_full_name_starting_with(&self, prefix: &str) -> RepoResult<Vec<Person>> {
        // substr() instead of LIKE: no wildcard escaping, case-sensitive.
        self.query_people(
            "WHERE substr(full_name, 1, length(?1)) = ?1",
            params![prefix],
        )
    }

    fn find_by_hobby_starting_with(&self, prefix: &str) -> RepoResult<Vec<Person>> {
        self.query_people("WHERE substr(hobby, 1, length(?1)) = ?1", params![prefix])
    }

    fn save(&self, input: &PersonInput) -> RepoResult<PersonId> {
        input.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO people (full_name, age, email, hobby) VALUES (?1, ?2, ?3, ?4);",
            params![
                input.full_name.as_str(),
                input.age,
                input.email.as_str(),
                input.hobby.as_deref(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: PersonId, input: &PersonInput) -> RepoResult<()> {
        input.validate()?;

        let changed = self.conn()?.execute(
            "UPDATE people
             SET
                full_name = ?1,
                age = ?2,
                email = ?3,
                hobby = ?4
             WHERE id = ?5;",
            params![
                input.full_name.as_str(),
                input.age,
                input.email.as_str(),
                input.hobby.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: PersonId) -> RepoResult<bool> {
        let changed = self
            .conn()?
            .execute("DELETE FROM people WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: PersonId = row.get("id")?;
    let age: i64 = row.get("age")?;
    let age = i32::try_from(age).map_err(|_| {
        RepoError::InvalidData(format!("age `{age}` out of range in people.age (id={id})"))
    })?;

    let input = PersonInput {
        full_name: row.get("full_name")?,
        age,
        email: row.get("email")?,
        hobby: row.get("hobby")?,
    };
    Ok(Person::from_input(id, input))
}
