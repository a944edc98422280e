// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Account REST API contract types and validation
//!
//! These types describe the JSON bodies exchanged with the account service.
//! They are shared between the server and the integration tests that drive it
//! over HTTP.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;

/// Media type every account creation request must carry
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Service name reported by the index endpoint
pub const SERVICE_NAME: &str = "Account REST API Service";

/// API version reported by the index endpoint
pub const API_VERSION: &str = "1.0";
