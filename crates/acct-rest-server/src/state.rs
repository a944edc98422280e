// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::config::ServerConfig;
use crate::models::AccountRepository;
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Account persistence
    pub accounts: Arc<dyn AccountRepository>,
}

impl AppState {
    pub fn new(config: ServerConfig, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { config, accounts }
    }
}
