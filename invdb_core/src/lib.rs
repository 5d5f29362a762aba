use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

pub mod console;
pub mod engine;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{EntryError, Result};

/// Rows shown by table previews unless the session is configured otherwise.
pub const DEFAULT_PREVIEW_LIMIT: usize = 24;

/// One interactive session against a local store.
///
/// Owns the single store connection for the lifetime of the session. The
/// connection is released when the session is dropped or explicitly closed.
#[derive(Debug)]
pub struct Session {
    path: Option<PathBuf>,
    conn: Connection,
    preview_limit: usize,
}

impl Session {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let conn = Connection::open(&path)?;
        debug!(path = %path.display(), "opened store");
        Self::from_connection(conn, Some(path))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        // The store is the authoritative foreign key check; SQLite ships with it off.
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            path,
            conn,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        })
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit.max(1);
        self
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Closes the connection, surfacing any error the implicit drop would swallow.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| EntryError::from(err))
    }
}
