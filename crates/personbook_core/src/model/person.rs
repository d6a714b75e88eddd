//! Person entity and its validation rule.
//!
//! # Responsibility
//! - Define the record shape persisted to the `person` table.
//! - Enforce non-empty first/last names in every constructor and setter.
//!
//! # Invariants
//! - Names are never empty or whitespace-only once a `Person` exists.
//! - `id == UNASSIGNED_ID` until the store assigns a generated key.
//! - Equality and hashing are structural over (id, first_name, last_name).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary-key domain of the `person` table.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = i64;

/// Sentinel id for entities that have not been persisted yet.
///
/// SQLite never generates rowid 0, so the sentinel cannot collide with a
/// store-assigned key.
pub const UNASSIGNED_ID: PersonId = 0;

/// Validation failure for person name fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyFirstName,
    EmptyLastName,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
        }
    }
}

impl Error for PersonValidationError {}

/// Canonical person record.
///
/// Fields are private so that every mutation goes through the validating
/// setters; repositories write the generated key back via [`Person::set_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
}

impl Person {
    /// Creates an unpersisted person with validated names.
    ///
    /// The id starts as [`UNASSIGNED_ID`]; the real key is assigned by the
    /// repository on create.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        Self::with_id(UNASSIGNED_ID, first_name, last_name)
    }

    /// Creates a person with a caller-provided id.
    ///
    /// Used by read paths rebuilding entities from stored rows. Validates
    /// names exactly like [`Person::new`].
    pub fn with_id(
        id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        validate_name(&first_name, PersonValidationError::EmptyFirstName)?;
        validate_name(&last_name, PersonValidationError::EmptyLastName)?;
        Ok(Self {
            id,
            first_name,
            last_name,
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Returns whether the store has assigned a key to this entity.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Overwrites the id, typically with a store-generated key.
    pub fn set_id(&mut self, id: PersonId) {
        self.id = id;
    }

    /// Replaces the first name; rejects empty input and leaves the entity
    /// unchanged on failure.
    pub fn set_first_name(
        &mut self,
        first_name: impl Into<String>,
    ) -> Result<(), PersonValidationError> {
        let first_name = first_name.into();
        validate_name(&first_name, PersonValidationError::EmptyFirstName)?;
        self.first_name = first_name;
        Ok(())
    }

    /// Replaces the last name; rejects empty input and leaves the entity
    /// unchanged on failure.
    pub fn set_last_name(
        &mut self,
        last_name: impl Into<String>,
    ) -> Result<(), PersonValidationError> {
        let last_name = last_name.into();
        validate_name(&last_name, PersonValidationError::EmptyLastName)?;
        self.last_name = last_name;
        Ok(())
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Person {{ id: {}, first_name: {}, last_name: {} }}",
            self.id, self.first_name, self.last_name
        )
    }
}

fn validate_name(value: &str, error: PersonValidationError) -> Result<(), PersonValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}
