// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server error types and handling

use acct_rest_api_contract::{ApiContractError, ErrorResponse, JSON_MEDIA_TYPE};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] acct_local_db::Error),

    #[error("{0}")]
    InvalidAccount(#[from] ApiContractError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Content-Type must be {}", JSON_MEDIA_TYPE)]
    UnsupportedMediaType,

    #[error("Account with id [{0}] could not be found.")]
    AccountNotFound(String),

    #[error("Resource {0} not found")]
    NotFound(String),

    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidAccount(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServerError::AccountNotFound(_) | ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Database(_) | ServerError::Config(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert the error into the JSON error body
    pub fn to_error_response(&self) -> ErrorResponse {
        let status = self.status();
        let error = match self {
            ServerError::AccountNotFound(_) => "Account not found".to_string(),
            _ => status.canonical_reason().unwrap_or("Error").to_string(),
        };
        let message = match self {
            // Internal details stay in the logs
            ServerError::Database(_) => "Database operation failed".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            status: status.as_u16(),
            error,
            message,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {}", err))
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("Background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_not_found_uses_fixed_error_title() {
        let body = ServerError::AccountNotFound("0".into()).to_error_response();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Account not found");
        assert_eq!(body.message, "Account with id [0] could not be found.");
    }

    #[test]
    fn unsupported_media_type_message() {
        let body = ServerError::UnsupportedMediaType.to_error_response();
        assert_eq!(body.status, 415);
        assert_eq!(body.error, "Unsupported Media Type");
        assert_eq!(body.message, "Content-Type must be application/json");
    }

    #[test]
    fn invalid_account_maps_to_bad_request() {
        let err = ServerError::from(ApiContractError::MissingField("email"));
        let body = err.to_error_response();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "Invalid Account: missing email");
    }

    #[test]
    fn database_details_are_not_leaked() {
        let err = ServerError::from(acct_local_db::Error::Poisoned);
        let body = err.to_error_response();
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "Database operation failed");
    }
}
