//! Domain model for person records.
//!
//! # Responsibility
//! - Define the canonical `Person` entity used by repositories and services.
//! - Own the non-empty-name validation rule enforced on every write.
//!
//! # Invariants
//! - A `Person` value always carries non-empty first and last names.
//! - `UNASSIGNED_ID` marks an entity that has not been persisted yet.

pub mod person;
