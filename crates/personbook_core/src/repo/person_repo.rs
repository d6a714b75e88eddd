//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and search APIs over the `person` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `create` rejects duplicate (first_name, last_name) pairs with a typed
//!   `Conflict` error; the schema-level UNIQUE constraint backs the check.
//! - `update`/`delete` confirm existence via rows-affected and report
//!   `NotFound` instead of succeeding silently.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::{Person, PersonId, PersonValidationError};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PERSON_TABLE: &str = "person";
const REQUIRED_COLUMNS: &[&str] = &["person_id", "first_name", "last_name"];

const PERSON_SELECT_SQL: &str = "SELECT
    person_id,
    first_name,
    last_name
FROM person";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for person persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PersonValidationError),
    Db(DbError),
    NotFound(PersonId),
    Conflict {
        first_name: String,
        last_name: String,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::Conflict {
                first_name,
                last_name,
            } => write!(
                f,
                "person named `{first_name} {last_name}` already exists"
            ),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted person data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}; apply migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
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

/// Repository interface for person CRUD and search operations.
pub trait PersonRepository {
    /// Inserts a new person and writes the generated key back into the
    /// entity. Fails with `Conflict` when the name pair is already stored.
    fn create(&self, person: &mut Person) -> RepoResult<PersonId>;
    /// Looks up a single person by primary key.
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Returns every stored person in storage order.
    fn find_all(&self) -> RepoResult<Vec<Person>>;
    /// Returns every person whose first or last name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>>;
    /// Rewrites the row matching the entity's id; `NotFound` when absent,
    /// `Conflict` when the new name pair belongs to another stored person.
    fn update(&self, person: &Person) -> RepoResult<()>;
    /// Removes the row with the given key; `NotFound` when absent.
    fn delete(&self, id: PersonId) -> RepoResult<()>;
    /// Reports whether a row with this primary key exists.
    fn exists_by_id(&self, id: PersonId) -> RepoResult<bool>;
    /// Reports whether a row with this exact name pair exists.
    fn exists_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<bool>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Wraps a migrated connection after verifying it carries the expected
    /// schema version, the `person` table, and its required columns.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [PERSON_TABLE],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable(PERSON_TABLE));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
        let present: HashSet<String> = stmt
            .query_map([PERSON_TABLE], |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        for &column in REQUIRED_COLUMNS {
            if !present.contains(column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: PERSON_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create(&self, person: &mut Person) -> RepoResult<PersonId> {
        // Fast-path duplicate check; the UNIQUE constraint closes the
        // check-then-insert race under concurrent writers.
        if self.exists_by_name(person.first_name(), person.last_name())? {
            return Err(conflict_for(person));
        }

        let inserted = self.conn.execute(
            "INSERT INTO person (first_name, last_name) VALUES (?1, ?2);",
            params![person.first_name(), person.last_name()],
        );
        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                person.set_id(id);
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => Err(conflict_for(person)),
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE person_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!("{PERSON_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();

        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL} WHERE first_name = ?1 OR last_name = ?1;"
        ))?;

        let mut rows = stmt.query([name])?;
        let mut persons = Vec::new();

        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn update(&self, person: &Person) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE person
             SET first_name = ?1, last_name = ?2
             WHERE person_id = ?3;",
            params![person.first_name(), person.last_name(), person.id()],
        );
        let changed = match changed {
            Ok(changed) => changed,
            // Renaming onto an existing pair trips the UNIQUE constraint.
            Err(err) if is_unique_violation(&err) => return Err(conflict_for(person)),
            Err(err) => return Err(err.into()),
        };

        if changed == 0 {
            return Err(RepoError::NotFound(person.id()));
        }

        Ok(())
    }

    fn delete(&self, id: PersonId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM person WHERE person_id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn exists_by_id(&self, id: PersonId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM person WHERE person_id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM person WHERE first_name = ?1 AND last_name = ?2
            );",
            params![first_name, last_name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: PersonId = row.get("person_id")?;
    let first_name: String = row.get("first_name")?;
    let last_name: String = row.get("last_name")?;

    Person::with_id(id, first_name, last_name)
        .map_err(|err| RepoError::InvalidData(format!("row person_id={id}: {err}")))
}

fn conflict_for(person: &Person) -> RepoError {
    RepoError::Conflict {
        first_name: person.first_name().to_string(),
        last_name: person.last_name().to_string(),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
