//! SQLite-backed key-value store.

use std::{path::Path, sync::Mutex};

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::KeyValueStore;
use crate::error::{LearnError, Result, StoreResultExt};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";

/// Key-value store persisted in a single SQLite table.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).store_context("Failed to open database connection")?;
        Self::from_connection(connection)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().store_context("Failed to open in-memory database")?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        let schema_sql = include_str!("../../assets/schema.sql");
        connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize database schema")?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let connection = self.connection.lock().map_err(|_| LearnError::Configuration {
            message: "Database connection lock poisoned".to_string(),
        })?;
        f(&connection)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            conn.query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
                .optional()
                .store_context("Failed to read value")
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing key '{key}' ({} bytes)", value.len());
        self.with_connection(|conn| {
            conn.execute(UPSERT_VALUE_SQL, params![key, value, Timestamp::now().to_string()])
                .store_context("Failed to write value")?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        debug!("Deleting key '{key}'");
        self.with_connection(|conn| {
            conn.execute(DELETE_VALUE_SQL, params![key])
                .store_context("Failed to delete value")?;
            Ok(())
        })
    }
}
