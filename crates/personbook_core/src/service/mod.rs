//! Use-case services orchestrating repository access.
//!
//! # Responsibility
//! - Provide stable application-facing entry points for person management.
//! - Keep callers storage-agnostic behind the repository contract.

pub mod person_service;
