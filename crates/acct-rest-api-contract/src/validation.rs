// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Validate a create account payload
pub fn validate_account_payload(payload: &AccountPayload) -> Result<(), ApiContractError> {
    payload.validate()?;
    Ok(())
}

/// Validate an update payload
pub fn validate_account_update(update: &AccountUpdate) -> Result<(), ApiContractError> {
    update.validate()?;
    Ok(())
}

/// Check that a `Content-Type` header value names `expected`.
///
/// Parameters such as `charset` are ignored and the comparison is
/// case-insensitive.
pub fn media_type_matches(content_type: Option<&str>, expected: &str) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}
