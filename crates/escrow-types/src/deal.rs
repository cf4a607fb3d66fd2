//! Deal record types.
//!
//! Escrow contracts do not agree on the exact return layout of `getDeal`.
//! The binding hands back a [`DealWire`] describing the shape it actually
//! received, and the lookup normalises it into a single [`DealRecord`].

use crate::api::u256_serde;
use alloy::primitives::{Address, B256, U256};
use serde::Serialize;

/// Canonical deal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealRecord {
	pub buyer: Address,
	pub seller: Address,
	/// Deal amount in the token's smallest unit, as a decimal string.
	#[serde(with = "u256_serde")]
	pub amount: U256,
	/// Contract-defined status code.
	pub status: u8,
}

impl DealRecord {
	/// Returns true if every field holds its zero value.
	///
	/// This is what a contract returns for a mapping slot that was never written.
	pub fn is_empty(&self) -> bool {
		self.buyer.is_zero() && self.seller.is_zero() && self.amount.is_zero() && self.status == 0
	}
}

/// Raw `getDeal` return value as received from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealWire {
	/// Fields already typed by the binding.
	Named {
		buyer: Address,
		seller: Address,
		amount: U256,
		status: u8,
	},
	/// Raw return data split into ABI words; fields are positional.
	Words(Vec<B256>),
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_amount_serializes_as_decimal_string() {
		let deal = DealRecord {
			buyer: Address::repeat_byte(0x11),
			seller: Address::repeat_byte(0x22),
			amount: U256::from(2_500_000_000_000_000_000u128),
			status: 1,
		};

		let value = serde_json::to_value(&deal).unwrap();
		assert_eq!(value["amount"], json!("2500000000000000000"));
		assert_eq!(value["status"], json!(1));
		assert!(!deal.is_empty());
	}

	#[test]
	fn test_zero_record_is_empty() {
		let deal = DealRecord {
			buyer: Address::ZERO,
			seller: Address::ZERO,
			amount: U256::ZERO,
			status: 0,
		};
		assert!(deal.is_empty());
	}
}
