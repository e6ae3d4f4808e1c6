//! SQLite persistence layer: catalogue storage and the opened-pack ledger.
//!
//! RULE: Only the store talks to the database.
//! Generation never touches it; callers load a catalogue from it and
//! hand opened packs back to it.

use rusqlite::Connection;
use crate::error::PackResult;

mod card;
mod pack;

pub struct PackStore {
    conn: Connection,
}

impl PackStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> PackResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PackResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PackResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        log::info!("store: schema migrated");
        Ok(())
    }
}
