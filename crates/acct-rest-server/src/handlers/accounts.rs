// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Account lifecycle endpoints

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use acct_rest_api_contract::{
    validation::media_type_matches, Account, AccountPayload, AccountUpdate, ListQuery,
    MessageResponse, JSON_MEDIA_TYPE,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use tracing::{error, info, warn};

/// Create an account from the posted JSON body
pub async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<impl IntoResponse> {
    info!("Request to create an Account");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;

    let payload = AccountPayload::from_json(&body)?;
    let today = chrono::Utc::now().date_naive();
    let account = state.accounts.create(payload.into_new_account(today)).await?;
    info!(account_id = account.id, "Account created");

    let location = format!("/accounts/{}", account.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account),
    ))
}

/// List all accounts, optionally filtered by exact name
pub async fn list_accounts(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ServerResult<Json<Vec<Account>>> {
    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Invalid list query");
        ServerError::BadRequest(rejection.body_text())
    })?;
    info!(name = ?query.name, "Request to list Accounts");
    let accounts = state.accounts.list(query.name.as_deref()).await?;
    Ok(Json(accounts))
}

/// Fetch a single account
pub async fn get_account(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<Account>> {
    let (id, raw_id) = account_id(path, &uri)?;
    info!(account_id = id, "Request to read an Account");
    let account = find_account(&state, id, &raw_id).await?;
    Ok(Json(account))
}

/// Update the fields present in the body and return the stored account
pub async fn update_account(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ServerResult<Json<Account>> {
    let (id, raw_id) = account_id(path, &uri)?;
    info!(account_id = id, "Request to update an Account");
    let mut account = find_account(&state, id, &raw_id).await?;

    let update = AccountUpdate::from_json(&body)?;
    if update.is_empty() {
        return Ok(Json(account));
    }
    update.apply(&mut account);

    if !state.accounts.update(&account).await? {
        return Err(ServerError::AccountNotFound(raw_id));
    }
    info!(account_id = id, "Account updated");
    Ok(Json(account))
}

/// Delete an account
pub async fn delete_account(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let (id, raw_id) = account_id(path, &uri)?;
    info!(account_id = id, "Request to delete an Account");
    if !state.accounts.delete(id).await? {
        return Err(ServerError::AccountNotFound(raw_id));
    }
    info!(account_id = id, "Account deleted");
    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}

async fn find_account(state: &AppState, id: i64, raw_id: &str) -> ServerResult<Account> {
    state
        .accounts
        .get(id)
        .await?
        .ok_or_else(|| ServerError::AccountNotFound(raw_id.to_string()))
}

/// Resolve the `:id` segment. A segment the router cannot decode names no
/// account, so it is reported with the raw text of the request path.
fn account_id(
    path: Result<Path<String>, PathRejection>,
    uri: &Uri,
) -> ServerResult<(i64, String)> {
    let raw_id = match path {
        Ok(Path(raw_id)) => raw_id,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Undecodable account id");
            let segment = uri.path().rsplit('/').next().unwrap_or_default();
            return Err(ServerError::AccountNotFound(segment.to_string()));
        }
    };
    let id = parse_account_id(&raw_id)?;
    Ok((id, raw_id))
}

/// Account ids are non-negative integers; any other path segment cannot name
/// an account and is reported as not found.
fn parse_account_id(raw: &str) -> ServerResult<i64> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| ServerError::AccountNotFound(raw.to_string()))
}

/// Fail with 415 unless the request declares `media_type`
fn check_content_type(headers: &HeaderMap, media_type: &str) -> ServerResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if media_type_matches(content_type, media_type) {
        return Ok(());
    }
    error!(content_type = ?content_type, "Invalid Content-Type");
    Err(ServerError::UnsupportedMediaType)
}
