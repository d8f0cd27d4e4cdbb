//! Key-value access over the `kv` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const WORK_HISTORIES_KEY: &str = "work_histories";
pub const DAILY_REPORTS_KEY: &str = "daily_reports";

pub fn get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

/// Insert or overwrite; the last write wins.
pub fn put(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Decode the JSON collection stored under `key`, empty when absent.
pub fn load_collection<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<Vec<T>> {
    match get(conn, key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

pub fn save_collection<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> AppResult<()> {
    let json = serde_json::to_string(items)?;
    put(conn, key, &json)
}
