// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the account database
#[derive(Debug, Error)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored date '{value}' for account {id} is not a valid date")]
    InvalidDate { id: i64, value: String },

    #[error("Migration to schema version {version} failed: {reason}")]
    Migration { version: u32, reason: String },

    #[error("Database connection lock poisoned")]
    Poisoned,
}
