//! Durable string-keyed storage for JSON documents.
//!
//! The [`KeyValueStore`] trait is the only seam between the planner and its
//! persistence backend. Values are UTF-8 JSON text; the store never
//! interprets them.
//!
//! Two implementations ship with the crate:
//!
//! - [`SqliteStore`]: a single-table SQLite database, the default backend
//! - [`MemoryStore`]: a process-local map for tests and throwaway sessions

use crate::error::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Synchronous get/set/delete over string keys.
///
/// Implementations must be safe to share across threads; the planner calls
/// them from blocking worker tasks.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
