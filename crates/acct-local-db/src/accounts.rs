// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Row-level access to the `accounts` table

use crate::connection::Database;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, address, phone_number, date_joined FROM accounts";

/// An account row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// Column values for an insert; the id is assigned by SQLite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountRecord {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// Raw row before the date column is parsed
struct RawRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    phone_number: Option<String>,
    date_joined: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            address: row.get(3)?,
            phone_number: row.get(4)?,
            date_joined: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<AccountRecord> {
        let date_joined = NaiveDate::parse_from_str(&self.date_joined, DATE_FORMAT).map_err(
            |_| Error::InvalidDate {
                id: self.id,
                value: self.date_joined.clone(),
            },
        )?;
        Ok(AccountRecord {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            date_joined,
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Account persistence operations
#[derive(Clone)]
pub struct AccountStore {
    db: Arc<Database>,
}

impl AccountStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new account and return it with its assigned id
    pub fn insert(&self, account: &NewAccountRecord) -> Result<AccountRecord> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO accounts (name, email, address, phone_number, date_joined)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    account.name,
                    account.email,
                    account.address,
                    account.phone_number,
                    format_date(account.date_joined),
                ],
            )?;
            Ok(AccountRecord {
                id: conn.last_insert_rowid(),
                name: account.name.clone(),
                email: account.email.clone(),
                address: account.address.clone(),
                phone_number: account.phone_number.clone(),
                date_joined: account.date_joined,
            })
        })
    }

    /// Fetch one account by id
    pub fn get(&self, id: i64) -> Result<Option<AccountRecord>> {
        let raw = self.db.with_connection(|conn| {
            let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
            Ok(conn.query_row(&sql, params![id], RawRow::from_row).optional()?)
        })?;
        raw.map(RawRow::into_record).transpose()
    }

    /// All accounts in id order
    pub fn list(&self) -> Result<Vec<AccountRecord>> {
        self.query_all(&format!("{SELECT_COLUMNS} ORDER BY id"), params![])
    }

    /// Accounts whose name matches exactly, in id order
    pub fn find_by_name(&self, name: &str) -> Result<Vec<AccountRecord>> {
        self.query_all(
            &format!("{SELECT_COLUMNS} WHERE name = ?1 ORDER BY id"),
            params![name],
        )
    }

    /// Overwrite every column of an existing account. Returns `false` when no
    /// row has the record's id.
    pub fn update(&self, account: &AccountRecord) -> Result<bool> {
        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE accounts
                 SET name = ?1, email = ?2, address = ?3, phone_number = ?4, date_joined = ?5
                 WHERE id = ?6",
                params![
                    account.name,
                    account.email,
                    account.address,
                    account.phone_number,
                    format_date(account.date_joined),
                    account.id,
                ],
            )?)
        })?;
        Ok(changed > 0)
    }

    /// Delete an account. Returns `false` when it did not exist.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .db
            .with_connection(|conn| Ok(conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])?))?;
        Ok(changed > 0)
    }

    /// Remove every account
    pub fn delete_all(&self) -> Result<usize> {
        self.db
            .with_connection(|conn| Ok(conn.execute("DELETE FROM accounts", [])?))
    }

    fn query_all(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<AccountRecord>> {
        let rows = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params, RawRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;
        rows.into_iter().map(RawRow::into_record).collect()
    }
}
