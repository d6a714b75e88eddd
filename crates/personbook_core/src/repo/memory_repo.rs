//! In-memory person repository.
//!
//! # Responsibility
//! - Provide a storage-free implementation of the repository contract for
//!   tests and callers without a database.
//! - Own the explicit id-allocation strategy used when no store assigns
//!   generated keys.
//!
//! # Invariants
//! - The backing vector is the single source of truth; there is no shadow
//!   cache alongside a database.
//! - Ids handed out by one `IdSequence` are strictly increasing.

use crate::model::person::{Person, PersonId};
use crate::repo::person_repo::{PersonRepository, RepoError, RepoResult};
use std::cell::{Cell, RefCell};

/// Explicit id allocator for the in-memory path.
///
/// Constructed and owned by the caller; replaces any notion of a hidden
/// process-wide counter.
#[derive(Debug)]
pub struct IdSequence {
    next: Cell<PersonId>,
}

impl IdSequence {
    /// Starts allocation at 1, mirroring SQLite's first rowid.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: PersonId) -> Self {
        Self {
            next: Cell::new(first),
        }
    }

    /// Hands out the next id and advances the sequence.
    pub fn next_id(&self) -> PersonId {
        let id = self.next.get();
        self.next.set(id + 1);
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Vector-backed person repository.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    persons: RefCell<Vec<Person>>,
    ids: IdSequence,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::with_sequence(IdSequence::new())
    }

    /// Builds a repository around a caller-supplied id sequence.
    pub fn with_sequence(ids: IdSequence) -> Self {
        Self {
            persons: RefCell::new(Vec::new()),
            ids,
        }
    }

    /// Appends an already-identified entity as-is and returns it.
    ///
    /// Unlike `create`, no id is assigned and no duplicate check runs; this
    /// is the lightweight path for entities whose identity exists already.
    pub fn persist(&self, person: Person) -> Person {
        self.persons.borrow_mut().push(person.clone());
        person
    }

    pub fn len(&self) -> usize {
        self.persons.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.borrow().is_empty()
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn create(&self, person: &mut Person) -> RepoResult<PersonId> {
        if self.exists_by_name(person.first_name(), person.last_name())? {
            return Err(RepoError::Conflict {
                first_name: person.first_name().to_string(),
                last_name: person.last_name().to_string(),
            });
        }

        let id = self.ids.next_id();
        person.set_id(id);
        self.persons.borrow_mut().push(person.clone());
        Ok(id)
    }

    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        Ok(self
            .persons
            .borrow()
            .iter()
            .find(|person| person.id() == id)
            .cloned())
    }

    fn find_all(&self) -> RepoResult<Vec<Person>> {
        Ok(self.persons.borrow().clone())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        Ok(self
            .persons
            .borrow()
            .iter()
            .filter(|person| person.first_name() == name || person.last_name() == name)
            .cloned()
            .collect())
    }

    fn update(&self, person: &Person) -> RepoResult<()> {
        let mut persons = self.persons.borrow_mut();

        // Renaming onto another entity's name pair is a conflict, matching
        // the SQLite implementation's UNIQUE constraint.
        let taken = persons.iter().any(|stored| {
            stored.id() != person.id()
                && stored.first_name() == person.first_name()
                && stored.last_name() == person.last_name()
        });
        if taken {
            return Err(RepoError::Conflict {
                first_name: person.first_name().to_string(),
                last_name: person.last_name().to_string(),
            });
        }

        match persons.iter_mut().find(|stored| stored.id() == person.id()) {
            Some(stored) => {
                *stored = person.clone();
                Ok(())
            }
            None => Err(RepoError::NotFound(person.id())),
        }
    }

    fn delete(&self, id: PersonId) -> RepoResult<()> {
        let mut persons = self.persons.borrow_mut();
        match persons.iter().position(|person| person.id() == id) {
            Some(index) => {
                persons.remove(index);
                Ok(())
            }
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn exists_by_id(&self, id: PersonId) -> RepoResult<bool> {
        Ok(self
            .persons
            .borrow()
            .iter()
            .any(|person| person.id() == id))
    }

    fn exists_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<bool> {
        Ok(self
            .persons
            .borrow()
            .iter()
            .any(|person| person.first_name() == first_name && person.last_name() == last_name))
    }
}
