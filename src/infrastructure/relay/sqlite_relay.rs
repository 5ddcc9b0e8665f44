use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::ports::relay::{RelayError, RelayStore};

use super::migrations;

/// SQLite-backed relay so a reading published by the check step is still
/// there when the report step runs as a separate process.
pub struct SqliteRelay {
    conn: Mutex<Connection>,
}

impl SqliteRelay {
    /// Open (or create) the relay database at the given path.
    ///
    /// Expands `~`, creates parent directories, opens the connection,
    /// sets WAL mode and pragmas, and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::WriteFailed` if the database cannot be opened
    /// or initialized.
    pub fn new(path: &str) -> Result<Self, RelayError> {
        let expanded = shellexpand::tilde(path);
        let db_path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RelayError::WriteFailed(e.to_string()))?;
        }

        let conn =
            Connection::open(&db_path).map_err(|e| RelayError::WriteFailed(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| RelayError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| RelayError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| RelayError::WriteFailed(e.to_string()))?;

        migrations::initialize_schema(&conn).map_err(|e| RelayError::WriteFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Remove entries older than the given retention period.
    ///
    /// Relay values only have meaning within their run; anything older
    /// than the retention window is housekeeping debt.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::WriteFailed` if deletion fails.
    pub fn cleanup_old(&self, retention_hours: u64) -> Result<(), RelayError> {
        let hours =
            i64::try_from(retention_hours).map_err(|e| RelayError::WriteFailed(e.to_string()))?;
        let delta = chrono::TimeDelta::try_hours(hours)
            .ok_or_else(|| RelayError::WriteFailed("invalid retention hours".into()))?;
        let cutoff = (Utc::now() - delta).to_rfc3339();

        let conn = self
            .conn
            .lock()
            .map_err(|_| RelayError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "DELETE FROM relay_entries WHERE published_at < ?1",
            params![cutoff],
        )
        .map_err(|e| RelayError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }
}

impl RelayStore for SqliteRelay {
    fn publish(&self, run_id: &str, key: &str, value: &str) -> Result<(), RelayError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| RelayError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "INSERT INTO relay_entries (run_id, key, value, published_at) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(run_id, key) DO UPDATE \
             SET value = excluded.value, published_at = excluded.published_at",
            params![run_id, key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| RelayError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }

    fn fetch(&self, run_id: &str, key: &str) -> Result<String, RelayError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| RelayError::ReadFailed("lock poisoned".into()))?;

        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM relay_entries WHERE run_id = ?1 AND key = ?2",
                params![run_id, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| RelayError::ReadFailed(e.to_string()))?;

        drop(conn);
        value.ok_or_else(|| RelayError::NotFound(format!("{run_id}/{key}")))
    }
}
