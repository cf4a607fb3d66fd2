//! Escrow report types.
//!
//! An [`EscrowReport`] is assembled fresh for every request from a fixed
//! sequence of read calls. It is never persisted and carries no identity
//! beyond the request that produced it.

use crate::probe::Probe;
use alloy::primitives::Address;
use serde::Serialize;

/// Network the chain client is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
	/// Human-readable label for the network (e.g. "BSC Testnet").
	pub name: String,
	/// Chain identifier reported by the RPC endpoint.
	pub chain_id: u64,
}

/// State of the escrow contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowSnapshot {
	/// Escrow contract address.
	pub address: Address,
	/// Contract owner, if the contract exposes `owner()`.
	pub owner: Probe<Address>,
	/// Number of deals as a decimal string, from `totalDeals()` or `dealCount()`.
	pub total_deals: Probe<String>,
	/// True iff bytecode is deployed at the address.
	pub verified: bool,
}

/// Descriptive metadata of a fungible token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

impl TokenMetadata {
	/// Metadata assumed when the token contract does not answer.
	pub fn fallback() -> Self {
		Self {
			name: "USDT".to_string(),
			symbol: "USDT".to_string(),
			decimals: 18,
		}
	}
}

/// State of the token held by the escrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
	/// Token contract address.
	pub address: Address,
	#[serde(flatten)]
	pub metadata: TokenMetadata,
	/// Token balance of the escrow contract, scaled by `decimals`.
	pub escrow_balance: Probe<String>,
}

/// State of the service's own wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
	/// Wallet address derived from the configured private key.
	pub address: Address,
	/// Native currency balance, scaled by 18 decimals.
	pub native_balance: Probe<String>,
}

/// Aggregate of all snapshots taken for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowReport {
	pub network: NetworkInfo,
	pub escrow_contract: EscrowSnapshot,
	pub token: TokenSnapshot,
	pub wallet: WalletSnapshot,
	/// ISO-8601 time at which the report was completed.
	pub timestamp: String,
}
