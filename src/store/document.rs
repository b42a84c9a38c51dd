//! Key/value document persistence for quickmarks.
//!
//! Provides the [`DocumentStore`] struct that wraps a `rusqlite::Connection`
//! holding whole JSON values per key, and broadcasts a [`StoreChange`] to
//! every subscriber after each write.
//!
//! Consistency model: last write wins. `set` replaces the entire value for a
//! key; there are no transactions across keys. Two surfaces that each
//! read-modify-write the same key race, and the second write silently drops
//! the first surface's change. This is a documented limitation of the store,
//! not something callers should try to work around.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::types::errors::StoreError;

/// Capacity of the change-notification channel. A lagging subscriber loses
/// the oldest notifications, never the stored data itself.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// One committed write, delivered to every subscriber (including the
/// surface that performed it).
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

/// Durable key/value store shared by all surfaces.
///
/// The connection is guarded by a mutex so the store can sit behind an
/// `Arc` and be touched from independently scheduled tasks; each operation
/// holds the lock only for its own read or write.
pub struct DocumentStore {
    conn: Mutex<Connection>,
    changes: broadcast::Sender<StoreChange>,
}

impl DocumentStore {
    /// Opens (or creates) the store at the given file path and runs migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory store. The data is discarded on drop; useful for
    /// tests and ephemeral surfaces.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             CREATE TABLE IF NOT EXISTS documents (
                 key TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );",
        )?;
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            conn: Mutex::new(conn),
            changes,
        })
    }

    /// Reads the whole value stored under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Replaces the whole value stored under `key`.
    ///
    /// The write commits before this returns; subscribers observe the
    /// resulting [`StoreChange`] the next time they poll their receiver.
    pub fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let old: Option<String> = conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        let text = serde_json::to_string(&value)?;
        conn.execute(
            "INSERT INTO documents (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        let old_value = match old {
            Some(text) => Some(serde_json::from_str(&text)?),
            None => None,
        };

        // emitted while the lock is still held: send order must match
        // commit order or verbatim-applying subscribers cache stale values
        self.emit(StoreChange {
            key: key.to_string(),
            old_value,
            new_value: Some(value),
        });
        Ok(())
    }

    /// Deletes `key`. A change with `new_value = None` is emitted only if
    /// the key actually existed.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let old: Option<String> = conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        conn.execute("DELETE FROM documents WHERE key = ?1", params![key])?;
        let old_value = match old {
            Some(text) => Some(serde_json::from_str(&text)?),
            None => None,
        };

        // same locking rule as set: emit under the lock, in commit order
        if old_value.is_some() {
            self.emit(StoreChange {
                key: key.to_string(),
                old_value,
                new_value: None,
            });
        }
        Ok(())
    }

    /// Subscribes to the change-notification stream. Every `set` and
    /// effective `remove` is delivered to every receiver obtained here.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    fn emit(&self, change: StoreChange) {
        // send only fails when no subscriber exists, which is fine
        let _ = self.changes.send(change);
    }
}
