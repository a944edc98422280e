// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Custom middleware

use crate::error::ServerError;
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Give the router's bare 405 responses the same JSON body as every other
/// error. The `Allow` header is kept.
pub async fn json_method_not_allowed(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    warn!(%method, %path, "Method not allowed");
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json = ServerError::MethodNotAllowed { method, path }.into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}
