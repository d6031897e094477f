//! SQLite connection for the vault file.
//!
//! Every connection runs with `secure_delete` on, so rows removed by a save
//! or a wipe are zeroed in the page rather than left in the free list.
//! [`Database::purge_log`] folds the write-ahead log back into the main file
//! and truncates it, dropping older page images that still hold those rows.

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::migrations;

pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens (or creates) the vault file at `path` and brings its schema up to date.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::init(conn, Some(path.as_ref().to_path_buf()))
    }

    /// Opens a vault database that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, rusqlite::Error> {
        conn.execute_batch("PRAGMA secure_delete = ON;")?;
        migrations::run_all(&conn)?;
        Ok(Self { conn, path })
    }

    /// File backing this database, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Checkpoints the write-ahead log into the main file and truncates it.
    ///
    /// A no-op for in-memory databases.
    pub fn purge_log(&self) -> Result<(), rusqlite::Error> {
        if self.path.is_none() {
            return Ok(());
        }
        self.conn
            .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
