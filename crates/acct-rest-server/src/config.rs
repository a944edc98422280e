// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration
//!
//! Settings are layered from lowest to highest precedence: built-in defaults,
//! an optional TOML file, `ACCT_*` environment variables, then command-line
//! flags (applied by the binary).

use crate::error::{ServerError, ServerResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Prefix for environment overrides, e.g. `ACCT_BIND_ADDR`
pub const ENV_PREFIX: &str = "ACCT";

/// Database path that selects a private in-memory database
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database, or `:memory:`
    pub database_path: String,

    /// Allow any origin instead of the local development origins
    pub enable_cors: bool,

    /// Runtime worker threads; `None` uses one per CPU core
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_path: IN_MEMORY_DATABASE.to_string(),
            enable_cors: false,
            workers: None,
        }
    }
}

impl ServerConfig {
    /// Load defaults, then `config_file` (if any), then `ACCT_*` variables
    pub fn load(config_file: Option<&Path>) -> ServerResult<Self> {
        Self::load_with_env_prefix(config_file, ENV_PREFIX)
    }

    pub(crate) fn load_with_env_prefix(
        config_file: Option<&Path>,
        env_prefix: &str,
    ) -> ServerResult<Self> {
        let defaults = ServerConfig::default();
        let mut builder = config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr.to_string())?
            .set_default("database_path", defaults.database_path)?
            .set_default("enable_cors", defaults.enable_cors)?;

        if let Some(path) = config_file {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let loaded: ServerConfig = builder
            .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the runtime cannot honour
    pub fn validate(&self) -> ServerResult<()> {
        if self.workers == Some(0) {
            return Err(ServerError::Config(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.database_path.trim().is_empty() {
            return Err(ServerError::Config(
                "database_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn uses_in_memory_database(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}
