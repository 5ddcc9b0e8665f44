use rusqlite::Connection;

/// Initialize the relay schema, creating tables if they don't exist.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS relay_entries (
            run_id       TEXT NOT NULL,
            key          TEXT NOT NULL,
            value        TEXT NOT NULL,
            published_at TEXT NOT NULL,
            PRIMARY KEY (run_id, key)
        );

        CREATE INDEX IF NOT EXISTS idx_relay_published_at ON relay_entries(published_at);",
    )?;
    Ok(())
}
