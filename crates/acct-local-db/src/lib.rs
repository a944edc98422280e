// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! SQLite persistence for accounts
//!
//! A single `accounts` table holds every account. The [`Database`] handle owns
//! one connection behind a mutex and applies schema migrations on open;
//! [`AccountStore`] provides the row-level operations.

mod accounts;
mod connection;
mod error;
mod migrations;

pub use accounts::{AccountRecord, AccountStore, NewAccountRecord};
pub use connection::Database;
pub use error::{Error, Result};
pub use migrations::SCHEMA_VERSION;
