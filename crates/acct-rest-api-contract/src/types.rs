// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the account service

use crate::error::ApiContractError;
use chrono::NaiveDate;
use crate::validation::{validate_account_payload, validate_account_update};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Wire format for `date_joined`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored account as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// An account that has passed validation but has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// Body of `POST /accounts`
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct AccountPayload {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub email: String,
    #[validate(length(min = 1, max = 256))]
    pub address: String,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    pub date_joined: Option<NaiveDate>,
}

/// Body of `PUT /accounts/{id}`; absent fields keep their stored value.
///
/// `phone_number` is the only nullable column: `Some(None)` means the body
/// sent an explicit `null` and the stored number is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct AccountUpdate {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub address: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<Option<String>>,
    pub date_joined: Option<NaiveDate>,
}

/// Loosely typed view of an account body. Every key is optional here so
/// that missing keys and mistyped values can be reported separately.
#[derive(Debug, Deserialize)]
struct RawAccountBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "present")]
    phone_number: Option<Option<String>>,
    #[serde(default)]
    date_joined: Option<String>,
}

impl RawAccountBody {
    fn parse(body: &[u8]) -> Result<Self, ApiContractError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(ApiContractError::BadData(format!(
                "expected a JSON object, got {}",
                value
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn date_joined(&self) -> Result<Option<NaiveDate>, ApiContractError> {
        self.date_joined.as_deref().map(parse_date).transpose()
    }
}

/// Marks a key as present, so an explicit `null` becomes `Some(None)` while a
/// missing key falls back to the field default `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, ApiContractError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiContractError::InvalidDate(value.to_string()))
}

impl AccountPayload {
    /// Parse and validate a creation body.
    ///
    /// Required keys are checked in the order `name`, `email`, `address`.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiContractError> {
        let raw = RawAccountBody::parse(body)?;
        let date_joined = raw.date_joined()?;
        let payload = AccountPayload {
            name: raw.name.ok_or(ApiContractError::MissingField("name"))?,
            email: raw.email.ok_or(ApiContractError::MissingField("email"))?,
            address: raw.address.ok_or(ApiContractError::MissingField("address"))?,
            phone_number: raw.phone_number.flatten(),
            date_joined,
        };
        validate_account_payload(&payload)?;
        Ok(payload)
    }

    /// Resolve the payload into a storable account, defaulting `date_joined`
    /// to `today`.
    pub fn into_new_account(self, today: NaiveDate) -> NewAccount {
        NewAccount {
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            date_joined: self.date_joined.unwrap_or(today),
        }
    }
}

impl AccountUpdate {
    /// Parse and validate an update body
    pub fn from_json(body: &[u8]) -> Result<Self, ApiContractError> {
        let raw = RawAccountBody::parse(body)?;
        let update = AccountUpdate {
            date_joined: raw.date_joined()?,
            name: raw.name,
            email: raw.email,
            address: raw.address,
            phone_number: raw.phone_number,
        };
        validate_account_update(&update)?;
        Ok(update)
    }

    /// Copy every present field onto `account`
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(address) = self.address {
            account.address = address;
        }
        if let Some(phone_number) = self.phone_number {
            account.phone_number = phone_number;
        }
        if let Some(date_joined) = self.date_joined {
            account.date_joined = date_joined;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == AccountUpdate::default()
    }
}

/// Query string accepted by `GET /accounts`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self {
            name: crate::SERVICE_NAME.to_string(),
            version: crate::API_VERSION.to_string(),
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
