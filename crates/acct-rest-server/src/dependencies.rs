// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dependency wiring for the REST server

use crate::{
    config::ServerConfig,
    error::ServerResult,
    models::{AccountRepository, InMemoryAccountRepository, SqliteAccountRepository},
    state::AppState,
};
use acct_local_db::{AccountStore, Database};
use std::sync::Arc;
use tracing::info;

/// Default dependency builder: a SQLite-backed repository at the configured path
pub struct DefaultServerDependencies {
    state: AppState,
}

impl DefaultServerDependencies {
    /// Open the database and build the repository
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let db = if config.uses_in_memory_database() {
            info!("Using in-memory SQLite database");
            Database::open_in_memory()?
        } else {
            let path = config.database_path.clone();
            tokio::task::spawn_blocking(move || Database::open(path)).await??
        };

        let store = AccountStore::new(Arc::new(db));
        let accounts: Arc<dyn AccountRepository> = Arc::new(SqliteAccountRepository::new(store));

        Ok(Self {
            state: AppState::new(config, accounts),
        })
    }

    /// Consume the dependency builder and return the resulting app state
    pub fn into_state(self) -> AppState {
        self.state
    }
}

/// Dependencies backed by the in-memory repository, for tests and local demos
pub struct InMemoryServerDependencies {
    state: AppState,
}

impl InMemoryServerDependencies {
    pub fn new(config: ServerConfig) -> Self {
        let accounts: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
        Self {
            state: AppState::new(config, accounts),
        }
    }

    pub fn into_state(self) -> AppState {
        self.state
    }
}
