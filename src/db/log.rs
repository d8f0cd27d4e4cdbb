use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Append one line to the internal `log` table.
///
/// Callers treat a failure here as non-fatal.
pub fn wlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
        params![Local::now().to_rfc3339(), operation, target, message],
    )?;
    Ok(())
}
