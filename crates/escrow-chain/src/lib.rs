//! Blockchain access module for the escrow report service.
//!
//! This module defines the read-only interfaces used to query an EVM node:
//! a chain client for network-level state (chain id, native balances,
//! bytecode) and two contract bindings, one for the escrow contract and one
//! for the token it holds. Concrete implementations live under
//! [`implementations`].

use async_trait::async_trait;
use escrow_types::{Address, Bytes, DealWire, NetworkInfo, U256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
		pub mod contracts;
	}
	#[cfg(any(test, feature = "testing"))]
	pub mod mock;
}

/// Errors that can occur while reading chain state.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The RPC endpoint could not be reached or answered at transport level.
	#[error("Connection error: {0}")]
	Connection(String),
	/// The contract does not implement the method, reverted, or returned
	/// data that could not be decoded.
	#[error("{method}() not available: {reason}")]
	UnsupportedCall {
		method: &'static str,
		reason: String,
	},
	/// The configured private key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

impl ChainError {
	/// Builds an [`ChainError::UnsupportedCall`] for the given method.
	pub fn unsupported(method: &'static str, reason: impl Into<String>) -> Self {
		ChainError::UnsupportedCall {
			method,
			reason: reason.into(),
		}
	}
}

/// Read connection to a blockchain RPC endpoint plus the service wallet.
///
/// Implementations are stateless for reads and are shared across requests.
#[async_trait]
pub trait ChainInterface: Send + Sync {
	/// Queries the endpoint's chain identifier.
	async fn get_network(&self) -> Result<NetworkInfo, ChainError>;

	/// Returns the native currency balance of an address in its smallest unit.
	async fn get_native_balance(&self, address: Address) -> Result<U256, ChainError>;

	/// Returns the bytecode deployed at an address (empty for accounts).
	async fn get_code(&self, address: Address) -> Result<Bytes, ChainError>;

	/// Address of the wallet derived from the configured private key.
	fn wallet_address(&self) -> Address;
}

/// Read-only binding to an escrow contract.
///
/// Deployed escrow contracts differ in which of these methods they expose;
/// every call may fail with [`ChainError::UnsupportedCall`].
#[async_trait]
pub trait EscrowBinding: Send + Sync {
	/// Address the binding is bound to.
	fn address(&self) -> Address;

	async fn owner(&self) -> Result<Address, ChainError>;

	async fn total_deals(&self) -> Result<U256, ChainError>;

	async fn deal_count(&self) -> Result<U256, ChainError>;

	/// Fetches a deal record in whatever shape the contract returns it.
	async fn get_deal(&self, deal_id: U256) -> Result<DealWire, ChainError>;

	async fn balance_of(&self, account: Address) -> Result<U256, ChainError>;
}

/// Read-only binding to a fungible token contract.
#[async_trait]
pub trait TokenBinding: Send + Sync {
	/// Address the binding is bound to.
	fn address(&self) -> Address;

	async fn name(&self) -> Result<String, ChainError>;

	async fn symbol(&self) -> Result<String, ChainError>;

	async fn decimals(&self) -> Result<u8, ChainError>;

	async fn total_supply(&self) -> Result<U256, ChainError>;

	async fn balance_of(&self, account: Address) -> Result<U256, ChainError>;
}
