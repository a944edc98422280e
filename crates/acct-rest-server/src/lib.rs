// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Account REST API server
//!
//! Serves create/read/update/delete/list operations on customer accounts
//! over JSON, backed by SQLite, along with health and index endpoints.

pub mod config;
pub mod dependencies;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
