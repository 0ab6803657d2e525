//! SQLite-backed key-value storage.
//!
//! The tracker keeps a single record (the history ledger) but the table is
//! a generic `kv` so other session state can sit next to it.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::store::HistoryStore;
use crate::error::{DatabaseError, Result};

const DB_FILE: &str = "kidtime.db";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/kidtime.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl HistoryStore for Database {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv_get(key)?)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(self.kv_set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kidtime.db");
        {
            let mut db = Database::open_at(&path).unwrap();
            db.save("k", "[1,2]").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn open_at_reports_path_on_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("nested").join("kidtime.db");
        match Database::open_at(&path) {
            Err(crate::error::CoreError::Database(DatabaseError::OpenFailed { path: p, .. })) => {
                assert_eq!(p, path)
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opening under a missing directory should fail"),
        }
    }
}
