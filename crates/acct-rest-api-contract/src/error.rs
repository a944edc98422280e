// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for account payload parsing and validation

use thiserror::Error;

/// Errors raised while turning a request body into an account
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Invalid Account: missing {0}")]
    MissingField(&'static str),

    #[error("Invalid Account: body of request contained bad or no data {0}")]
    BadData(String),

    #[error("Invalid Account: bad date_joined {0}")]
    InvalidDate(String),

    #[error("Invalid Account: {}", describe_validation(.0))]
    Validation(#[from] validator::ValidationErrors),
}

impl From<serde_json::Error> for ApiContractError {
    fn from(err: serde_json::Error) -> Self {
        ApiContractError::BadData(err.to_string())
    }
}

/// Render field-level validation failures as `field (code), field (code)`,
/// sorted by field name so messages are stable.
fn describe_validation(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{} ({})", field, codes.join(", "))
        })
        .collect();
    fields.sort();
    format!("invalid field(s): {}", fields.join(", "))
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Short error title, e.g. `Bad Request` or `Account not found`
    pub error: String,
    /// Human-readable explanation
    pub message: String,
}
