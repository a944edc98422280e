// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request handlers

pub mod accounts;
pub mod health;

use crate::error::ServerError;
use axum::http::Uri;

/// Fallback for routes that do not exist
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}
