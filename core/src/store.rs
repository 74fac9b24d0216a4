//! SQLite persistence for dashboard UI state.
//!
//! The only long-lived value is the selected segment id, stored under a
//! fixed namespaced key. It is read once at startup and written on every
//! selection change; anything absent or unrecognized falls back to the
//! first available segment id.

use crate::error::SimResult;
use rusqlite::{params, Connection, OptionalExtension};

pub const SELECTED_SEGMENT_KEY: &str = "customer-dashboard:selected-segment";

pub struct DashStore {
    conn: Connection,
    path: Option<String>,
}

impl DashStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ui_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Load the persisted selection, falling back to the first valid id
    /// when the stored value is absent or no longer a known segment.
    pub fn load_selected_segment(&self, valid_ids: &[String]) -> SimResult<String> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM ui_state WHERE key = ?1",
                params![SELECTED_SEGMENT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let fallback = valid_ids.first().cloned().unwrap_or_default();
        match stored {
            Some(id) if valid_ids.contains(&id) => Ok(id),
            Some(id) => {
                log::warn!("stored segment '{id}' no longer exists, falling back to '{fallback}'");
                Ok(fallback)
            }
            None => Ok(fallback),
        }
    }

    pub fn save_selected_segment(&self, id: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO ui_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![SELECTED_SEGMENT_KEY, id],
        )?;
        Ok(())
    }
}
