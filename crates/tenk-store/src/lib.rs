//! Storage layer for the tracker.
//!
//! Persists the tracker snapshot in a small `rusqlite` key-value table.
//! The whole state lives under a single fixed key and every save overwrites
//! it in one statement, so there are no partial updates.
//!
//! # Thread Safety
//!
//! [`Store`] wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The CLI uses one store per process and a single writer at a time.
//!
//! # Schema
//!
//! ```text
//! kv(key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at TEXT NOT NULL)
//! ```
//!
//! `value` holds the JSON payload described in [`tenk_core::snapshot`];
//! `updated_at` is an ISO 8601 UTC timestamp (e.g., `2024-01-15T10:30:00Z`).

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tenk_core::{Snapshot, snapshot};
use thiserror::Error;

/// Key the tracker state is stored under.
pub const STATE_KEY: &str = "tenk_timer_state";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database could not be opened, read or written.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The snapshot could not be serialized.
    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Durable slot for the tracker state.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a store at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store.
    ///
    /// Useful for testing. The data is gone when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Writes the snapshot, replacing whatever was stored before.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot::encode(snapshot).map_err(StoreError::Encode)?;
        self.write_raw(STATE_KEY, &json)?;
        tracing::debug!(
            categories = snapshot.ledger().len(),
            total_seconds = snapshot.legacy_total(),
            "saved state"
        );
        Ok(())
    }

    /// Reads the stored snapshot.
    ///
    /// Returns `None` if nothing was saved yet. A stored value that cannot
    /// be parsed is logged and also treated as `None`; the caller starts
    /// over from defaults. Storage failures are returned as errors.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(raw) = self.read_raw(STATE_KEY)? else {
            return Ok(None);
        };
        match snapshot::decode(raw.as_bytes()) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored state, starting fresh");
                Ok(None)
            }
        }
    }

    /// When the state was last saved, as ISO 8601.
    pub fn last_saved_at(&self) -> Result<Option<String>, StoreError> {
        let saved_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                params![STATE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(saved_at)
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use tenk_core::{Session, Tracker};

    fn sample_tracker() -> Tracker {
        let mut tracker = Tracker::new();
        tracker.add_category("Rust").unwrap();
        tracker.add_minutes(90.0);
        tracker
    }

    #[test]
    fn test_load_empty_store_returns_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(store.last_saved_at().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_reconstructs_state() {
        let store = Store::open_in_memory().unwrap();
        let tracker = sample_tracker();
        store.save(&tracker.snapshot()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.ledger(), tracker.ledger());
        assert_eq!(loaded.current_category().as_str(), "Rust");
        assert_eq!(*loaded.session(), Session::Idle);
        assert!(store.last_saved_at().unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let store = Store::open_in_memory().unwrap();
        let mut tracker = sample_tracker();
        store.save(&tracker.snapshot()).unwrap();

        tracker.reset();
        store.save(&tracker.snapshot()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.legacy_total(), 0);
        assert_eq!(loaded.ledger().len(), 1);

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_running_session_is_restored() {
        let store = Store::open_in_memory().unwrap();
        let mut tracker = sample_tracker();
        let started_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        tracker.start(started_at);
        store.save(&tracker.snapshot()).unwrap();

        let restored = Tracker::from_snapshot(store.load().unwrap().unwrap());
        assert_eq!(restored, tracker);
        assert_eq!(restored.session().started_at(), Some(started_at));
    }

    #[test]
    fn test_corrupt_value_loads_as_none() {
        let store = Store::open_in_memory().unwrap();
        store.write_raw(STATE_KEY, "{broken").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_legacy_value_is_migrated() {
        let store = Store::open_in_memory().unwrap();
        store
            .write_raw(STATE_KEY, r#"{"totalSeconds": 7200, "running": false}"#)
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.ledger().total_of("General"), 7200);
        assert_eq!(loaded.current_category().as_str(), "General");
    }

    #[test]
    fn test_loosely_typed_value_keeps_totals() {
        let store = Store::open_in_memory().unwrap();
        store
            .write_raw(
                STATE_KEY,
                r#"{"techTotals": {"Zig": 5, "Go": 300}, "running": null, "overlayAlpha": "0.5"}"#,
            )
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.ledger().total_of("Go"), 300);
        assert_eq!(loaded.current_category().as_str(), "Zig");
        assert_eq!(*loaded.session(), Session::Idle);
    }

    #[test]
    fn test_state_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenk.db");

        {
            let store = Store::open(&path).unwrap();
            store.save(&sample_tracker().snapshot()).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.ledger().total_of("Rust"), 5400);
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tenk.db");
        assert!(matches!(Store::open(&path), Err(StoreError::Sqlite(_))));
    }
}
