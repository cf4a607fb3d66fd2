//! Shared handles to the chain client and contract bindings.

use escrow_chain::implementations::evm::alloy::AlloyChainClient;
use escrow_chain::implementations::evm::contracts::{AlloyEscrow, AlloyToken};
use escrow_chain::{ChainError, ChainInterface, EscrowBinding, TokenBinding};
use escrow_config::ChainConfig;
use escrow_types::Address;
use std::sync::Arc;

/// Everything a request needs to read chain state.
///
/// Built once at startup and shared by all requests. The handles are
/// read-only, so no locking is involved.
#[derive(Clone)]
pub struct EscrowContext {
	pub chain: Arc<dyn ChainInterface>,
	pub escrow: Arc<dyn EscrowBinding>,
	pub token: Arc<dyn TokenBinding>,
}

impl EscrowContext {
	pub fn new(
		chain: Arc<dyn ChainInterface>,
		escrow: Arc<dyn EscrowBinding>,
		token: Arc<dyn TokenBinding>,
	) -> Self {
		Self {
			chain,
			escrow,
			token,
		}
	}

	/// Connects to the configured endpoint and binds both contracts.
	pub async fn from_config(config: &ChainConfig) -> Result<Self, ChainError> {
		let client =
			AlloyChainClient::connect(&config.rpc_url, &config.private_key, &config.network_name)
				.await?;
		let provider = client.provider();

		let escrow = AlloyEscrow::new(config.escrow_address, provider.clone());
		let token = AlloyToken::new(config.token_address, provider);

		tracing::info!(
			escrow = %config.escrow_address,
			token = %config.token_address,
			"Contract bindings ready"
		);

		Ok(Self::new(Arc::new(client), Arc::new(escrow), Arc::new(token)))
	}

	pub fn escrow_address(&self) -> Address {
		self.escrow.address()
	}

	pub fn token_address(&self) -> Address {
		self.token.address()
	}

	pub fn wallet_address(&self) -> Address {
		self.chain.wallet_address()
	}
}
