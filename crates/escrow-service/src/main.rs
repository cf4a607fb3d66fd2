//! Main entry point for the escrow report service.
//!
//! This binary serves a read-only HTTP API over an escrow contract and the
//! token it holds, plus statistics over a local item file.

use clap::Parser;
use escrow_config::Config;
use escrow_core::EscrowContext;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the escrow report service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the escrow report service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Loads `.env` and initializes logging infrastructure
/// 3. Loads the configuration file
/// 4. Connects to the RPC endpoint and binds the contracts
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let env_file = dotenvy::dotenv().ok();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	if let Some(path) = env_file {
		tracing::debug!(path = %path.display(), "Loaded environment file");
	}

	let config_path = args.config.to_string_lossy();
	let config = Config::from_file(&config_path).await?;
	tracing::info!(
		network = %config.chain.network_name,
		config = %config_path,
		"Loaded configuration"
	);

	let context = EscrowContext::from_config(&config.chain).await?;

	server::start_server(Arc::new(config), Arc::new(context)).await?;

	tracing::info!("Stopped escrow report service");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_args_default_values() {
		let args = Args::parse_from(["escrow-api"]);

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_custom_values() {
		let args = Args::parse_from(["escrow-api", "--config", "custom.toml", "-l", "debug"]);

		assert_eq!(args.config, PathBuf::from("custom.toml"));
		assert_eq!(args.log_level, "debug");
	}
}
