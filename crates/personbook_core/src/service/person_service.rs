//! Person use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service holds an explicitly constructed repository; there is no
//!   process-wide store instance.

use crate::model::person::{Person, PersonId};
use crate::repo::person_repo::{PersonRepository, RepoResult};

/// Use-case service wrapper for person CRUD operations.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates names, stores a new person, and returns the entity with
    /// its store-assigned id.
    ///
    /// # Contract
    /// - Empty names fail with a validation error before any storage access.
    /// - Duplicate name pairs fail with a conflict error.
    pub fn register(&self, first_name: &str, last_name: &str) -> RepoResult<Person> {
        let mut person = Person::new(first_name, last_name)?;
        self.repo.create(&mut person)?;
        Ok(person)
    }

    /// Stores a new person through repository persistence.
    pub fn create(&self, person: &mut Person) -> RepoResult<PersonId> {
        self.repo.create(person)
    }

    /// Gets one person by id.
    pub fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.repo.find_by_id(id)
    }

    /// Lists every stored person.
    pub fn find_all(&self) -> RepoResult<Vec<Person>> {
        self.repo.find_all()
    }

    /// Lists persons whose first or last name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        self.repo.find_by_name(name)
    }

    /// Updates an existing person by id.
    ///
    /// Returns repository-level not-found or conflict errors unchanged.
    pub fn update(&self, person: &Person) -> RepoResult<()> {
        self.repo.update(person)
    }

    /// Deletes a person by id.
    pub fn delete(&self, id: PersonId) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Reports whether a person with this id is stored.
    pub fn exists_by_id(&self, id: PersonId) -> RepoResult<bool> {
        self.repo.exists_by_id(id)
    }

    /// Reports whether a person with this exact name pair is stored.
    pub fn exists_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<bool> {
        self.repo.exists_by_name(first_name, last_name)
    }
}
