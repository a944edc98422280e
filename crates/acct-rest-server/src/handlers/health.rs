// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Health and index endpoints

use acct_rest_api_contract::{HealthResponse, IndexResponse};
use axum::Json;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Root URL response
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse::default())
}
