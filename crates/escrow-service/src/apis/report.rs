//! Escrow report endpoint.

use super::error_chain;
use escrow_config::ReportConfig;
use escrow_core::{build_report, unavailable_fields, EscrowContext};
use escrow_types::{iso_timestamp, APIError, EscrowReport, ReportMetadata, ReportResponse};

/// Handles GET /api/report.
pub async fn get_report(
	ctx: &EscrowContext,
	labels: &ReportConfig,
) -> Result<ReportResponse, APIError> {
	let report = build_report(ctx).await.map_err(|e| {
		tracing::error!(error = %error_chain(&e), "Escrow report failed");
		APIError::InternalServerError {
			error_type: "BLOCKCHAIN_ERROR".to_string(),
			message: "Failed to fetch escrow contract data".to_string(),
			details: Some(serde_json::Value::String(error_chain(&e))),
		}
	})?;

	log_summary(&report);

	Ok(ReportResponse {
		success: true,
		message: format!(
			"Successfully fetched escrow contract data from {}",
			report.network.name
		),
		data: report,
		metadata: ReportMetadata {
			api_version: labels.api_version.clone(),
			response_time: iso_timestamp(),
			blockchain: labels.blockchain.clone(),
			provider: labels.provider.clone(),
		},
	})
}

fn log_summary(report: &EscrowReport) {
	tracing::info!(
		network = %report.network.name,
		chain_id = report.network.chain_id,
		escrow = %report.escrow_contract.address,
		owner = %report.escrow_contract.owner,
		total_deals = %report.escrow_contract.total_deals,
		verified = report.escrow_contract.verified,
		"Escrow contract"
	);
	tracing::info!(
		token = %report.token.address,
		name = %report.token.metadata.name,
		symbol = %report.token.metadata.symbol,
		decimals = report.token.metadata.decimals,
		escrow_balance = %report.token.escrow_balance,
		"Token"
	);
	tracing::info!(
		wallet = %report.wallet.address,
		native_balance = %report.wallet.native_balance,
		"Service wallet"
	);

	let missing = unavailable_fields(report);
	if !missing.is_empty() {
		tracing::warn!(fields = ?missing, "Report completed with unavailable fields");
	}
}
