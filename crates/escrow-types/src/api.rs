//! API types for the escrow report HTTP API.
//!
//! This module defines the response envelopes returned by the report, deal
//! and stats endpoints, together with the structured error type used by all
//! handlers.

use crate::{deal::DealRecord, report::EscrowReport, stats::ItemStats};
use alloy::primitives::U256;
use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::fmt;

/// Metadata attached to every successful report response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
	pub api_version: String,
	/// ISO-8601 time at which the response was produced.
	pub response_time: String,
	/// Human-readable blockchain name.
	pub blockchain: String,
	/// RPC provider label.
	pub provider: String,
}

/// Response for GET /report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
	pub success: bool,
	pub message: String,
	pub data: EscrowReport,
	pub metadata: ReportMetadata,
}

/// Response for GET /report/deal/{dealId}.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
	pub success: bool,
	/// Requested deal id as a decimal string.
	#[serde(with = "u256_serde")]
	pub deal_id: U256,
	pub deal: DealRecord,
}

/// Response for GET /stats.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
	pub success: bool,
	pub stats: ItemStats,
}

/// API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
	/// Error type/code
	pub error: String,
	/// Human-readable description
	pub message: String,
	/// Additional error context
	pub details: Option<serde_json::Value>,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum APIError {
	/// Bad request with validation errors (400)
	BadRequest {
		error_type: String,
		message: String,
		details: Option<serde_json::Value>,
	},
	/// Requested resource does not exist (404)
	NotFound { error_type: String, message: String },
	/// Internal server error (500)
	InternalServerError {
		error_type: String,
		message: String,
		details: Option<serde_json::Value>,
	},
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			APIError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			APIError::NotFound { .. } => StatusCode::NOT_FOUND,
			APIError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			APIError::BadRequest {
				error_type,
				message,
				details,
			}
			| APIError::InternalServerError {
				error_type,
				message,
				details,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: details.clone(),
			},
			APIError::NotFound {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: None,
			},
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			APIError::NotFound { message, .. } => write!(f, "Not Found: {}", message),
			APIError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for APIError {}

impl IntoResponse for APIError {
	fn into_response(self) -> Response {
		(self.status_code(), Json(self.to_error_response())).into_response()
	}
}

/// Serde module for U256 serialization as decimal strings.
pub mod u256_serde {
	use alloy::primitives::U256;
	use serde::{Serialize, Serializer};

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		value.to_string().serialize(serializer)
	}
}
