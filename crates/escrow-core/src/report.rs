//! Escrow report aggregation.
//!
//! A report is assembled from a fixed sequence of reads. Only the network
//! query is required; every other field degrades to a sentinel or a default
//! when its read fails, so a report always carries every key.

use crate::context::EscrowContext;
use crate::fallback::FallbackChain;
use escrow_chain::ChainError;
use escrow_types::{
	format_native, format_units, iso_timestamp, EscrowReport, EscrowSnapshot, TokenMetadata,
	TokenSnapshot, WalletSnapshot,
};
use thiserror::Error;

/// Errors that abort a report.
#[derive(Debug, Error)]
pub enum ReportError {
	/// The network could not be queried.
	#[error("Failed to connect to blockchain")]
	Connection(#[source] ChainError),
}

/// Builds a fresh report of the escrow, its token and the service wallet.
pub async fn build_report(ctx: &EscrowContext) -> Result<EscrowReport, ReportError> {
	let network = ctx.chain.get_network().await.map_err(|e| {
		tracing::error!(error = %e, "Network query failed");
		ReportError::Connection(e)
	})?;
	tracing::debug!(network = %network.name, chain_id = network.chain_id, "Network resolved");

	let wallet_address = ctx.wallet_address();
	let native_balance = FallbackChain::new("wallet.nativeBalance")
		.probe("eth_getBalance", async {
			ctx.chain
				.get_native_balance(wallet_address)
				.await
				.map(format_native)
		})
		.resolve()
		.await;

	let owner = FallbackChain::new("escrowContract.owner")
		.probe("owner", ctx.escrow.owner())
		.resolve()
		.await;

	let total_deals = FallbackChain::new("escrowContract.totalDeals")
		.probe("totalDeals", async {
			ctx.escrow.total_deals().await.map(|n| n.to_string())
		})
		.probe("dealCount", async {
			ctx.escrow.deal_count().await.map(|n| n.to_string())
		})
		.resolve()
		.await;

	let metadata = FallbackChain::new("token.metadata")
		.probe("name+symbol+decimals", async {
			let (name, symbol, decimals) =
				futures::try_join!(ctx.token.name(), ctx.token.symbol(), ctx.token.decimals())?;
			Ok::<_, ChainError>(TokenMetadata {
				name,
				symbol,
				decimals,
			})
		})
		.resolve_or(TokenMetadata::fallback())
		.await;

	let escrow_address = ctx.escrow_address();
	let decimals = metadata.decimals;
	let escrow_balance = FallbackChain::new("token.escrowBalance")
		.probe("balanceOf", async {
			ctx.token
				.balance_of(escrow_address)
				.await
				.map(|raw| format_units(raw, decimals))
		})
		.resolve()
		.await;

	let verified = match ctx.chain.get_code(escrow_address).await {
		Ok(code) => !code.is_empty(),
		Err(e) => {
			tracing::debug!(error = %e, "Bytecode query failed, escrow not verified");
			false
		},
	};

	Ok(EscrowReport {
		network,
		escrow_contract: EscrowSnapshot {
			address: escrow_address,
			owner,
			total_deals,
			verified,
		},
		token: TokenSnapshot {
			address: ctx.token_address(),
			metadata,
			escrow_balance,
		},
		wallet: WalletSnapshot {
			address: wallet_address,
			native_balance,
		},
		timestamp: iso_timestamp(),
	})
}

/// Names of the report fields that carry the sentinel.
pub fn unavailable_fields(report: &EscrowReport) -> Vec<&'static str> {
	let checks = [
		("escrowContract.owner", report.escrow_contract.owner.is_found()),
		("escrowContract.totalDeals", report.escrow_contract.total_deals.is_found()),
		("token.escrowBalance", report.token.escrow_balance.is_found()),
		("wallet.nativeBalance", report.wallet.native_balance.is_found()),
	];
	checks
		.into_iter()
		.filter(|(_, found)| !found)
		.map(|(field, _)| field)
		.collect()
}
