//! Alloy contract bindings for the escrow and token contracts.
//!
//! Both bindings are generated from minimal Solidity interfaces with `sol!`
//! and share the client's provider. Only view functions are declared.

use super::alloy::{classify_contract_error, classify_rpc_error};
use crate::{ChainError, EscrowBinding, TokenBinding};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use escrow_types::DealWire;

// Solidity interfaces for the contracts the service reads from.
//
// These are the methods commonly found on escrow deployments and on ERC-20
// tokens with metadata; any of them may be missing on a given deployment.
sol! {
	#[sol(rpc)]
	interface IEscrow {
		function owner() external view returns (address);
		function totalDeals() external view returns (uint256);
		function dealCount() external view returns (uint256);
		function getDeal(uint256 dealId) external view returns (address buyer, address seller, uint256 amount, uint8 status);
		function balanceOf(address account) external view returns (uint256);
	}

	#[sol(rpc)]
	interface IERC20Metadata {
		function name() external view returns (string);
		function symbol() external view returns (string);
		function decimals() external view returns (uint8);
		function totalSupply() external view returns (uint256);
		function balanceOf(address account) external view returns (uint256);
	}
}

/// Escrow contract binding.
pub struct AlloyEscrow {
	contract: IEscrow::IEscrowInstance<DynProvider>,
	provider: DynProvider,
}

impl AlloyEscrow {
	pub fn new(address: Address, provider: DynProvider) -> Self {
		Self {
			contract: IEscrow::new(address, provider.clone()),
			provider,
		}
	}
}

#[async_trait]
impl EscrowBinding for AlloyEscrow {
	fn address(&self) -> Address {
		*self.contract.address()
	}

	async fn owner(&self) -> Result<Address, ChainError> {
		self.contract
			.owner()
			.call()
			.await
			.map_err(|e| classify_contract_error("owner", e))
	}

	async fn total_deals(&self) -> Result<U256, ChainError> {
		self.contract
			.totalDeals()
			.call()
			.await
			.map_err(|e| classify_contract_error("totalDeals", e))
	}

	async fn deal_count(&self) -> Result<U256, ChainError> {
		self.contract
			.dealCount()
			.call()
			.await
			.map_err(|e| classify_contract_error("dealCount", e))
	}

	async fn get_deal(&self, deal_id: U256) -> Result<DealWire, ChainError> {
		// Issue the call raw so that return data of a non-canonical length can
		// still be inspected instead of failing typed decoding.
		let input = IEscrow::getDealCall { dealId: deal_id }.abi_encode();
		let request = TransactionRequest::default()
			.to(self.address())
			.input(Bytes::from(input).into());

		let data = self
			.provider
			.call(request)
			.await
			.map_err(|e| classify_rpc_error("getDeal", e))?;

		decode_deal(&data)
	}

	async fn balance_of(&self, account: Address) -> Result<U256, ChainError> {
		self.contract
			.balanceOf(account)
			.call()
			.await
			.map_err(|e| classify_contract_error("balanceOf", e))
	}
}

/// Splits `getDeal` return data into positional words.
///
/// No typed decoding happens here; field extraction and range checks are
/// left to deal normalisation so every payload length follows one rule.
pub(crate) fn decode_deal(data: &[u8]) -> Result<DealWire, ChainError> {
	if data.is_empty() || data.len() % 32 != 0 {
		return Err(ChainError::unsupported(
			"getDeal",
			format!("unexpected return data length {}", data.len()),
		));
	}

	Ok(DealWire::Words(
		data.chunks_exact(32).map(B256::from_slice).collect(),
	))
}

/// ERC-20 token binding.
pub struct AlloyToken {
	contract: IERC20Metadata::IERC20MetadataInstance<DynProvider>,
}

impl AlloyToken {
	pub fn new(address: Address, provider: DynProvider) -> Self {
		Self {
			contract: IERC20Metadata::new(address, provider),
		}
	}
}

#[async_trait]
impl TokenBinding for AlloyToken {
	fn address(&self) -> Address {
		*self.contract.address()
	}

	async fn name(&self) -> Result<String, ChainError> {
		self.contract
			.name()
			.call()
			.await
			.map_err(|e| classify_contract_error("name", e))
	}

	async fn symbol(&self) -> Result<String, ChainError> {
		self.contract
			.symbol()
			.call()
			.await
			.map_err(|e| classify_contract_error("symbol", e))
	}

	async fn decimals(&self) -> Result<u8, ChainError> {
		self.contract
			.decimals()
			.call()
			.await
			.map_err(|e| classify_contract_error("decimals", e))
	}

	async fn total_supply(&self) -> Result<U256, ChainError> {
		self.contract
			.totalSupply()
			.call()
			.await
			.map_err(|e| classify_contract_error("totalSupply", e))
	}

	async fn balance_of(&self, account: Address) -> Result<U256, ChainError> {
		self.contract
			.balanceOf(account)
			.call()
			.await
			.map_err(|e| classify_contract_error("balanceOf", e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::sol_types::SolValue;

	fn into_words(wire: DealWire) -> Vec<B256> {
		match wire {
			DealWire::Words(words) => words,
			other => panic!("unexpected shape: {:?}", other),
		}
	}

	#[test]
	fn test_decode_canonical_deal() {
		let buyer = Address::repeat_byte(0x11);
		let seller = Address::repeat_byte(0x22);
		let data = (buyer, seller, U256::from(500u64), U256::from(2u8)).abi_encode();

		let words = into_words(decode_deal(&data).unwrap());
		assert_eq!(words.len(), 4);
		assert_eq!(Address::from_word(words[0]), buyer);
		assert_eq!(Address::from_word(words[1]), seller);
		assert_eq!(U256::from_be_bytes(words[2].0), U256::from(500u64));
		assert_eq!(U256::from_be_bytes(words[3].0), U256::from(2u8));
	}

	#[test]
	fn test_decode_keeps_out_of_range_status() {
		let data = (
			Address::ZERO,
			Address::ZERO,
			U256::ZERO,
			U256::from(256u64),
		)
			.abi_encode();

		let words = into_words(decode_deal(&data).unwrap());
		assert_eq!(U256::from_be_bytes(words[3].0), U256::from(256u64));
	}

	#[test]
	fn test_decode_extended_deal_as_words() {
		let buyer = Address::repeat_byte(0x11);
		let seller = Address::repeat_byte(0x22);
		let data = (
			buyer,
			seller,
			U256::from(500u64),
			U256::from(2u8),
			U256::from(1_700_000_000u64),
		)
			.abi_encode();

		let words = into_words(decode_deal(&data).unwrap());
		assert_eq!(words.len(), 5);
		assert_eq!(Address::from_word(words[0]), buyer);
		assert_eq!(Address::from_word(words[1]), seller);
	}

	#[test]
	fn test_decode_empty_return_is_unsupported() {
		let result = decode_deal(&[]);
		assert!(matches!(
			result,
			Err(ChainError::UnsupportedCall {
				method: "getDeal",
				..
			})
		));
	}

	#[test]
	fn test_decode_unaligned_return_is_unsupported() {
		let result = decode_deal(&[0u8; 40]);
		assert!(matches!(result, Err(ChainError::UnsupportedCall { .. })));
	}
}
