//! # cinder-db
//!
//! SQLite store layer for the Cinder engine. One database holds the
//! activity ledger, the factor tables, calculation results, aggregates,
//! reports, and signatures.
//!
//! - WAL mode, foreign keys enforced
//! - all timestamps are Unix epoch seconds
//! - schema version in `PRAGMA user_version`, forward-only migrations
//!
//! The [`Db`] handle implements the engine's store traits
//! (`FactorStore`, `ActivityStore`, `ReportStore`); see [`stores`].

pub mod migrations;
pub mod queries;
pub mod schema;
pub mod stores;

use std::path::Path;

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Database error types.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Handle over the Cinder database. Cheap to construct; owns one
/// connection.
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Open or create the database at the given path.
    ///
    /// Configures pragmas and runs any pending migrations.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        configure(&conn)?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Raw connection access for the query modules.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Configure SQLite pragmas.
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let db = Db::open_memory().expect("open in-memory db");
        let version: u32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("get user_version");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Db::open_memory().expect("open");
        let fk: i32 = db
            .conn()
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .expect("get foreign_keys");
        assert_eq!(fk, 1);
    }
}
