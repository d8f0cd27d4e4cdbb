//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file and bring its schema up to date.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        super::migrate::run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, schema included.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrate::run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }
}
