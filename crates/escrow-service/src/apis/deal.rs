//! Deal lookup endpoint.

use escrow_core::{get_deal, DealError, DealMissReason, EscrowContext};
use escrow_types::{APIError, DealResponse, U256};

/// Parses a deal id path segment into the contract's `uint256` id space.
///
/// Only plain decimal digits are accepted, so signs, whitespace and
/// fractional values are rejected rather than truncated.
pub fn parse_deal_id(raw: &str) -> Result<U256, APIError> {
	let invalid = || APIError::BadRequest {
		error_type: "INVALID_DEAL_ID".to_string(),
		message: "Invalid deal ID".to_string(),
		details: Some(serde_json::Value::String(raw.to_string())),
	};

	if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid());
	}
	U256::from_str_radix(raw, 10).map_err(|_| invalid())
}

/// Handles GET /api/report/deal/{dealId}.
pub async fn get_deal_by_id(ctx: &EscrowContext, raw_id: &str) -> Result<DealResponse, APIError> {
	let deal_id = parse_deal_id(raw_id)?;

	match get_deal(ctx, deal_id).await {
		Ok(deal) => {
			tracing::info!(
				deal_id = %deal_id,
				buyer = %deal.buyer,
				seller = %deal.seller,
				amount = %deal.amount,
				status = deal.status,
				"Deal fetched"
			);
			Ok(DealResponse {
				success: true,
				deal_id,
				deal,
			})
		},
		Err(e) => {
			tracing::warn!(deal_id = %deal_id, error = %e, "Deal lookup failed");
			Err(to_api_error(e))
		},
	}
}

fn to_api_error(err: DealError) -> APIError {
	let message = err.to_string();
	match err {
		DealError::NotFound {
			reason: DealMissReason::Empty,
			..
		} => APIError::NotFound {
			error_type: "DEAL_NOT_FOUND".to_string(),
			message,
		},
		DealError::NotFound {
			reason: DealMissReason::CallFailed(cause),
			..
		} => APIError::InternalServerError {
			error_type: "DEAL_LOOKUP_FAILED".to_string(),
			message,
			details: Some(serde_json::Value::String(cause)),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_deal_id() {
		assert_eq!(parse_deal_id("0").unwrap(), U256::ZERO);
		assert_eq!(parse_deal_id("42").unwrap(), U256::from(42u64));
		assert_eq!(parse_deal_id("007").unwrap(), U256::from(7u64));
		assert_eq!(
			parse_deal_id("18446744073709551616").unwrap(),
			U256::from(u64::MAX) + U256::from(1u64)
		);
		assert_eq!(parse_deal_id(&U256::MAX.to_string()).unwrap(), U256::MAX);

		let too_large = format!("{}0", U256::MAX);
		for raw in ["-1", "abc", "", "+5", "1.5", " 1", too_large.as_str()] {
			let err = parse_deal_id(raw).unwrap_err();
			assert_eq!(err.to_error_response().message, "Invalid deal ID", "input {:?}", raw);
		}
	}

	#[test]
	fn test_error_statuses() {
		use axum::http::StatusCode;

		let empty = to_api_error(DealError::NotFound {
			deal_id: U256::from(3u64),
			reason: DealMissReason::Empty,
		});
		assert_eq!(empty.status_code(), StatusCode::NOT_FOUND);

		let failed = to_api_error(DealError::NotFound {
			deal_id: U256::from(3u64),
			reason: DealMissReason::CallFailed("getDeal() not available: reverted".to_string()),
		});
		assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
