//! Connection-provider seam for calling applications.
//!
//! # Responsibility
//! - Let applications hand core a source of ready-to-use connections
//!   without core owning pooling, retries, or credentials.
//!
//! # Invariants
//! - Every acquired connection has migrations fully applied.

use super::open::open_db;
use super::DbResult;
use rusqlite::Connection;
use std::path::PathBuf;

/// Supplies ready-to-use database connections on demand.
///
/// Implementations own connection lifecycle policy; core only requires that
/// acquired connections are migrated and usable.
pub trait ConnectionProvider {
    fn acquire(&self) -> DbResult<Connection>;
}

/// File-backed provider: each acquire re-opens and migrates the same path.
///
/// In-memory databases have no provider because a fresh in-memory connection
/// is a fresh database; tests use `open_db_in_memory` directly.
#[derive(Debug, Clone)]
pub struct FileDatabase {
    path: PathBuf,
}

impl FileDatabase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConnectionProvider for FileDatabase {
    fn acquire(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}
