// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Schema migrations, tracked through `PRAGMA user_version`

use crate::error::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info};

/// Ordered migration scripts; entry `n` upgrades the schema to version `n + 1`.
const MIGRATIONS: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS accounts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT    NOT NULL,
    email        TEXT    NOT NULL,
    address      TEXT    NOT NULL,
    phone_number TEXT,
    date_joined  TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_accounts_name ON accounts(name);
"#];

/// Schema version after all migrations have run
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

pub(crate) fn current_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the schema up to [`SCHEMA_VERSION`]. Each step runs in its own
/// transaction so a failed step leaves the previous version intact.
pub(crate) fn migrate(conn: &mut Connection) -> Result<()> {
    let mut version = current_version(conn)?;
    if version > SCHEMA_VERSION {
        return Err(Error::Migration {
            version,
            reason: format!("database is newer than supported version {SCHEMA_VERSION}"),
        });
    }

    while version < SCHEMA_VERSION {
        let next = version + 1;
        let script = MIGRATIONS[version as usize];
        debug!(from = version, to = next, "Applying schema migration");

        let tx = conn.transaction()?;
        tx.execute_batch(script).map_err(|err| Error::Migration {
            version: next,
            reason: err.to_string(),
        })?;
        tx.pragma_update(None, "user_version", next)?;
        tx.commit()?;

        version = next;
    }

    info!(version, "Account database schema ready");
    Ok(())
}
