//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the person data-access contract.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors; failures are never swallowed.
//! - Duplicate (first_name, last_name) pairs are rejected on create.

pub mod memory_repo;
pub mod person_repo;
