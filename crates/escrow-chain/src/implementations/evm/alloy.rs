//! Alloy-based EVM chain client.
//!
//! Provides the concrete [`ChainInterface`] implementation used by the
//! service: an HTTP provider bound to a single JSON-RPC endpoint together with
//! the local signing identity of the service wallet.

use crate::{ChainError, ChainInterface};
use alloy::contract::Error as ContractError;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;
use escrow_types::{NetworkInfo, SecretString};

/// Alloy-based chain client.
///
/// Holds one type-erased provider; cloning the provider is cheap, so contract
/// bindings share it with the client.
pub struct AlloyChainClient {
	/// Provider bound to the configured RPC endpoint.
	provider: DynProvider,
	/// Signer derived from the configured private key.
	signer: PrivateKeySigner,
	/// Label reported as the network name.
	network_name: String,
}

impl AlloyChainClient {
	/// Connects to the RPC endpoint and derives the wallet identity.
	///
	/// Performs a chain id handshake so that an unreachable endpoint is
	/// reported here rather than on the first request.
	pub async fn connect(
		rpc_url: &str,
		private_key: &SecretString,
		network_name: impl Into<String>,
	) -> Result<Self, ChainError> {
		let signer = parse_signer(private_key)?;

		let url: Url = rpc_url
			.parse()
			.map_err(|e| ChainError::Connection(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		let provider = ProviderBuilder::new()
			.wallet(EthereumWallet::from(signer.clone()))
			.connect_http(url)
			.erased();

		let chain_id = provider.get_chain_id().await.map_err(|e| {
			ChainError::Connection(format!("Handshake with {} failed: {}", rpc_url, e))
		})?;

		tracing::info!(
			chain_id = chain_id,
			wallet = %signer.address(),
			"Connected to RPC endpoint"
		);

		Ok(Self {
			provider,
			signer,
			network_name: network_name.into(),
		})
	}

	/// Returns a handle to the underlying provider for contract bindings.
	pub fn provider(&self) -> DynProvider {
		self.provider.clone()
	}
}

#[async_trait]
impl ChainInterface for AlloyChainClient {
	async fn get_network(&self) -> Result<NetworkInfo, ChainError> {
		let chain_id = self
			.provider
			.get_chain_id()
			.await
			.map_err(|e| ChainError::Connection(format!("Failed to get chain id: {}", e)))?;

		Ok(NetworkInfo {
			name: self.network_name.clone(),
			chain_id,
		})
	}

	async fn get_native_balance(&self, address: Address) -> Result<U256, ChainError> {
		self.provider
			.get_balance(address)
			.await
			.map_err(|e| classify_rpc_error("eth_getBalance", e))
	}

	async fn get_code(&self, address: Address) -> Result<Bytes, ChainError> {
		self.provider
			.get_code_at(address)
			.await
			.map_err(|e| classify_rpc_error("eth_getCode", e))
	}

	fn wallet_address(&self) -> Address {
		self.signer.address()
	}
}

/// Parses the configured private key into a local signer.
pub(crate) fn parse_signer(private_key: &SecretString) -> Result<PrivateKeySigner, ChainError> {
	private_key.with_exposed(|key| {
		key.trim()
			.parse::<PrivateKeySigner>()
			.map_err(|_| ChainError::InvalidKey("Invalid private key format".to_string()))
	})
}

/// Maps an RPC failure onto the chain error taxonomy.
///
/// Only failures that never produced a JSON-RPC answer count as connectivity
/// problems; error responses (reverts, unknown methods) and undecodable
/// payloads mean the call itself is not usable.
pub(crate) fn classify_rpc_error(method: &'static str, err: TransportError) -> ChainError {
	match err {
		RpcError::Transport(kind) => {
			ChainError::Connection(format!("{} failed: {}", method, kind))
		},
		other => ChainError::unsupported(method, other.to_string()),
	}
}

/// Maps a contract call failure onto the chain error taxonomy.
pub(crate) fn classify_contract_error(method: &'static str, err: ContractError) -> ChainError {
	match err {
		ContractError::TransportError(e) => classify_rpc_error(method, e),
		other => ChainError::unsupported(method, other.to_string()),
	}
}
