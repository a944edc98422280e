// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{Error, Result};
use crate::migrations;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Handle to the account database
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database file and migrate it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening account database");
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "Journal mode set");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        migrations::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| Error::Poisoned)?;
        f(&conn)
    }

    /// Current schema version
    pub fn schema_version(&self) -> Result<u32> {
        self.with_connection(migrations::current_version)
    }
}
