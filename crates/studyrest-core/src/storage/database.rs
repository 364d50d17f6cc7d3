//! SQLite key-value storage.
//!
//! The saved session lives in a single row of the `kv` table. [`KvSlot`]
//! binds a database to one key and serves as the controller's durable slot.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;
use crate::persistence::SnapshotStore;

/// SQLite database holding the `kv` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/studyrest.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("studyrest.db"))
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Missing keys are fine.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Bind this database to one key.
    pub fn slot(self, key: impl Into<String>) -> KvSlot {
        KvSlot {
            db: self,
            key: key.into(),
        }
    }
}

/// One kv row used as a [`SnapshotStore`].
pub struct KvSlot {
    db: Database,
    key: String,
}

impl KvSlot {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotStore for KvSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.db.kv_get(&self.key)?)
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        Ok(self.db.kv_set(&self.key, value)?)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Ok(self.db.kv_delete(&self.key)?)
    }
}
