//! Core person-record management for PersonBook.
//! This crate is the single source of truth for the persistence contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{Person, PersonId, PersonValidationError, UNASSIGNED_ID};
pub use repo::memory_repo::{IdSequence, InMemoryPersonRepository};
pub use repo::person_repo::{
    PersonRepository, RepoError, RepoResult, SqlitePersonRepository,
};
pub use service::person_service::PersonService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
