//! Deal lookup.

use crate::context::EscrowContext;
use escrow_types::{Address, DealRecord, DealWire, U256};
use thiserror::Error;

/// Why a deal could not be returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealMissReason {
	/// The contract call failed or its answer could not be interpreted.
	#[error("{0}")]
	CallFailed(String),
	/// The contract answered with an unset record.
	#[error("no deal stored under this id")]
	Empty,
}

/// Errors returned by [`get_deal`].
#[derive(Debug, Error)]
pub enum DealError {
	#[error("Deal {deal_id} not found: {reason}")]
	NotFound {
		deal_id: U256,
		reason: DealMissReason,
	},
}

/// Errors raised while normalising positional deal data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealShapeError {
	#[error("expected at least 4 words, got {0}")]
	TooShort(usize),
	#[error("status {0} does not fit in uint8")]
	StatusOverflow(U256),
}

/// Converts a raw `getDeal` answer into a [`DealRecord`].
///
/// Positional data is read as buyer, seller, amount and status; trailing
/// words are ignored.
pub fn normalize_deal(wire: DealWire) -> Result<DealRecord, DealShapeError> {
	match wire {
		DealWire::Named {
			buyer,
			seller,
			amount,
			status,
		} => Ok(DealRecord {
			buyer,
			seller,
			amount,
			status,
		}),
		DealWire::Words(words) => {
			let [buyer, seller, amount, status, ..] = words.as_slice() else {
				return Err(DealShapeError::TooShort(words.len()));
			};

			let status = U256::from_be_bytes(status.0);
			if status > U256::from(u8::MAX) {
				return Err(DealShapeError::StatusOverflow(status));
			}

			Ok(DealRecord {
				buyer: Address::from_word(*buyer),
				seller: Address::from_word(*seller),
				amount: U256::from_be_bytes(amount.0),
				status: status.to::<u8>(),
			})
		},
	}
}

/// Reads a single deal from the escrow contract.
pub async fn get_deal(ctx: &EscrowContext, deal_id: U256) -> Result<DealRecord, DealError> {
	let not_found = |reason| DealError::NotFound { deal_id, reason };

	let wire = ctx
		.escrow
		.get_deal(deal_id)
		.await
		.map_err(|e| not_found(DealMissReason::CallFailed(e.to_string())))?;

	let record = normalize_deal(wire)
		.map_err(|e| not_found(DealMissReason::CallFailed(format!("malformed deal: {}", e))))?;

	if record.is_empty() {
		return Err(not_found(DealMissReason::Empty));
	}

	Ok(record)
}

#[cfg(test)]
mod tests {
	use super::*;
	use escrow_chain::implementations::mock::{MockChain, MockEscrow, MockToken};
	use escrow_types::B256;
	use std::collections::HashMap;
	use std::sync::Arc;

	fn word(value: u64) -> B256 {
		B256::from(U256::from(value))
	}

	fn context(deals: HashMap<U256, DealWire>) -> EscrowContext {
		let escrow = MockEscrow {
			deals,
			..Default::default()
		};
		EscrowContext::new(
			Arc::new(MockChain::default()),
			Arc::new(escrow),
			Arc::new(MockToken::default()),
		)
	}

	#[test]
	fn test_normalize_words_reads_by_position() {
		let buyer = Address::repeat_byte(0x11);
		let seller = Address::repeat_byte(0x22);
		let wire = DealWire::Words(vec![
			buyer.into_word(),
			seller.into_word(),
			word(500),
			word(3),
			word(1_700_000_000),
		]);

		let record = normalize_deal(wire).unwrap();
		assert_eq!(record.buyer, buyer);
		assert_eq!(record.seller, seller);
		assert_eq!(record.amount, U256::from(500u64));
		assert_eq!(record.status, 3);
	}

	#[test]
	fn test_normalize_rejects_misshaped_words() {
		let short = DealWire::Words(vec![word(1), word(2)]);
		assert_eq!(normalize_deal(short), Err(DealShapeError::TooShort(2)));

		let overflow = DealWire::Words(vec![word(1), word(2), word(3), word(256)]);
		assert!(matches!(
			normalize_deal(overflow),
			Err(DealShapeError::StatusOverflow(_))
		));
	}

	#[tokio::test]
	async fn test_get_deal_returns_record() {
		let wire = DealWire::Named {
			buyer: Address::repeat_byte(0x11),
			seller: Address::repeat_byte(0x22),
			amount: U256::from(10u64),
			status: 1,
		};
		let ctx = context(HashMap::from([(U256::ZERO, wire)]));

		let record = get_deal(&ctx, U256::ZERO).await.unwrap();
		assert_eq!(record.amount, U256::from(10u64));
		assert_eq!(record.status, 1);
	}

	#[tokio::test]
	async fn test_failed_call_is_not_found() {
		let ctx = context(HashMap::new());

		match get_deal(&ctx, U256::from(5u64)).await {
			Err(DealError::NotFound {
				deal_id,
				reason: DealMissReason::CallFailed(msg),
			}) => {
				assert_eq!(deal_id, U256::from(5u64));
				assert!(msg.contains("getDeal"));
			},
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_zero_record_is_empty() {
		let wire = DealWire::Named {
			buyer: Address::ZERO,
			seller: Address::ZERO,
			amount: U256::ZERO,
			status: 0,
		};
		let ctx = context(HashMap::from([(U256::from(9u64), wire)]));

		let result = get_deal(&ctx, U256::from(9u64)).await;
		match result {
			Err(DealError::NotFound { deal_id, reason }) => {
				assert_eq!(deal_id, U256::from(9u64));
				assert_eq!(reason, DealMissReason::Empty);
			},
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_misshaped_answer_is_call_failure() {
		let ctx = context(HashMap::from([(U256::from(2u64), DealWire::Words(vec![word(1)]))]));

		let result = get_deal(&ctx, U256::from(2u64)).await;
		assert!(matches!(
			result,
			Err(DealError::NotFound {
				reason: DealMissReason::CallFailed(_),
				..
			})
		));
	}

	#[tokio::test]
	async fn test_zero_fields_with_oversized_status_is_call_failure() {
		let wire = DealWire::Words(vec![
			Address::ZERO.into_word(),
			Address::ZERO.into_word(),
			word(0),
			word(256),
		]);
		let ctx = context(HashMap::from([(U256::from(4u64), wire)]));

		let result = get_deal(&ctx, U256::from(4u64)).await;
		assert!(matches!(
			result,
			Err(DealError::NotFound {
				reason: DealMissReason::CallFailed(_),
				..
			})
		));
	}

	#[tokio::test]
	async fn test_id_beyond_u64_is_forwarded() {
		let id = U256::from(u64::MAX) + U256::from(1u64);
		let wire = DealWire::Named {
			buyer: Address::repeat_byte(0x11),
			seller: Address::repeat_byte(0x22),
			amount: U256::from(1u64),
			status: 2,
		};
		let ctx = context(HashMap::from([(id, wire)]));

		let record = get_deal(&ctx, id).await.unwrap();
		assert_eq!(record.status, 2);
	}
}
