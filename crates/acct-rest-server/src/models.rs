// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Account repositories used by the handlers

use crate::error::ServerResult;
use acct_local_db::{AccountRecord, AccountStore, NewAccountRecord};
use acct_rest_api_contract::{Account, NewAccount};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Account persistence interface
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a new account and return it with its id
    async fn create(&self, account: NewAccount) -> ServerResult<Account>;
    async fn get(&self, id: i64) -> ServerResult<Option<Account>>;
    /// All accounts in id order, optionally restricted to an exact name
    async fn list(&self, name: Option<&str>) -> ServerResult<Vec<Account>>;
    /// Persist every field of `account`; `false` when it no longer exists
    async fn update(&self, account: &Account) -> ServerResult<bool>;
    /// `false` when there was nothing to delete
    async fn delete(&self, id: i64) -> ServerResult<bool>;
}

fn record_to_account(record: AccountRecord) -> Account {
    Account {
        id: record.id,
        name: record.name,
        email: record.email,
        address: record.address,
        phone_number: record.phone_number,
        date_joined: record.date_joined,
    }
}

fn account_to_record(account: &Account) -> AccountRecord {
    AccountRecord {
        id: account.id,
        name: account.name.clone(),
        email: account.email.clone(),
        address: account.address.clone(),
        phone_number: account.phone_number.clone(),
        date_joined: account.date_joined,
    }
}

/// SQLite-backed repository. Queries run on the blocking pool so they never
/// stall the async workers.
pub struct SqliteAccountRepository {
    store: AccountStore,
}

impl SqliteAccountRepository {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    async fn run<T, F>(&self, f: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(AccountStore) -> acct_local_db::Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        Ok(tokio::task::spawn_blocking(move || f(store)).await??)
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: NewAccount) -> ServerResult<Account> {
        let record = NewAccountRecord {
            name: account.name,
            email: account.email,
            address: account.address,
            phone_number: account.phone_number,
            date_joined: account.date_joined,
        };
        let stored = self.run(move |store| store.insert(&record)).await?;
        Ok(record_to_account(stored))
    }

    async fn get(&self, id: i64) -> ServerResult<Option<Account>> {
        let record = self.run(move |store| store.get(id)).await?;
        Ok(record.map(record_to_account))
    }

    async fn list(&self, name: Option<&str>) -> ServerResult<Vec<Account>> {
        let name = name.map(str::to_string);
        let records = self
            .run(move |store| match name {
                Some(name) => store.find_by_name(&name),
                None => store.list(),
            })
            .await?;
        Ok(records.into_iter().map(record_to_account).collect())
    }

    async fn update(&self, account: &Account) -> ServerResult<bool> {
        let record = account_to_record(account);
        self.run(move |store| store.update(&record)).await
    }

    async fn delete(&self, id: i64) -> ServerResult<bool> {
        self.run(move |store| store.delete(id)).await
    }
}

/// In-memory repository (for development/testing)
#[derive(Default)]
pub struct InMemoryAccountRepository {
    inner: RwLock<InMemoryAccounts>,
}

#[derive(Default)]
struct InMemoryAccounts {
    last_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> ServerResult<Account> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = Account {
            id: inner.last_id,
            name: account.name,
            email: account.email,
            address: account.address,
            phone_number: account.phone_number,
            date_joined: account.date_joined,
        };
        inner.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> ServerResult<Option<Account>> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn list(&self, name: Option<&str>) -> ServerResult<Vec<Account>> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .values()
            .filter(|account| name.map_or(true, |name| account.name == name))
            .cloned()
            .collect())
    }

    async fn update(&self, account: &Account) -> ServerResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.accounts.get_mut(&account.id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> ServerResult<bool> {
        Ok(self.inner.write().await.accounts.remove(&id).is_some())
    }
}
