//! Configuration module for the escrow report service.
//!
//! This module provides structures and utilities for managing service
//! configuration. Configuration is loaded from a TOML file in which every
//! `${VAR}` or `${VAR:-default}` placeholder is replaced with the value of the
//! corresponding environment variable before parsing, then validated.

use escrow_types::{Address, SecretString};
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the escrow report service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Configuration for the HTTP server.
	#[serde(default)]
	pub server: ServerConfig,
	/// Blockchain connection and contract addresses.
	pub chain: ChainConfig,
	/// Labels reported in the report metadata.
	#[serde(default)]
	pub report: ReportConfig,
	/// Local item statistics.
	#[serde(default)]
	pub stats: StatsConfig,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_host")]
	pub host: String,
	/// First port to try binding to.
	#[serde(default = "default_port")]
	pub port: u16,
	/// Number of consecutive ports to try when the port is already in use.
	#[serde(default = "default_port_attempts")]
	pub port_attempts: u16,
	/// CORS configuration. All origins are allowed when absent.
	pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
			port_attempts: default_port_attempts(),
			cors: None,
		}
	}
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
	/// Allowed origins for CORS.
	pub allowed_origins: Vec<String>,
}

/// Blockchain connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
	/// Label reported as the network name.
	#[serde(default = "default_network_name")]
	pub network_name: String,
	/// HTTP(S) JSON-RPC endpoint.
	pub rpc_url: String,
	/// Private key of the service wallet.
	pub private_key: SecretString,
	/// Address of the escrow contract.
	pub escrow_address: Address,
	/// Address of the token held by the escrow.
	pub token_address: Address,
}

/// Labels reported in the report response metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
	#[serde(default = "default_api_version")]
	pub api_version: String,
	/// Human-readable blockchain name.
	#[serde(default = "default_blockchain")]
	pub blockchain: String,
	/// RPC provider label.
	#[serde(default = "default_provider")]
	pub provider: String,
}

impl Default for ReportConfig {
	fn default() -> Self {
		Self {
			api_version: default_api_version(),
			blockchain: default_blockchain(),
			provider: default_provider(),
		}
	}
}

/// Configuration for the local item statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
	/// Path of the JSON file holding the item list.
	#[serde(default = "default_data_path")]
	pub data_path: String,
}

impl Default for StatsConfig {
	fn default() -> Self {
		Self {
			data_path: default_data_path(),
		}
	}
}

fn default_host() -> String {
	"127.0.0.1".to_string()
}

fn default_port() -> u16 {
	3001
}

fn default_port_attempts() -> u16 {
	10
}

fn default_network_name() -> String {
	"BSC Testnet".to_string()
}

fn default_api_version() -> String {
	"1.0".to_string()
}

fn default_blockchain() -> String {
	"Binance Smart Chain Testnet".to_string()
}

fn default_provider() -> String {
	"Alchemy".to_string()
}

fn default_data_path() -> String {
	"data/items.json".to_string()
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut missing = Vec::new();
	let resolved = re.replace_all(input, |caps: &regex::Captures<'_>| {
		let var_name = &caps[1];
		match std::env::var(var_name) {
			Ok(value) => value,
			Err(_) => match caps.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					missing.push(var_name.to_string());
					String::new()
				},
			},
		}
	});

	if !missing.is_empty() {
		return Err(ConfigError::Validation(format!(
			"Environment variable(s) not found: {}",
			missing.join(", ")
		)));
	}

	Ok(resolved.into_owned())
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read configuration file {}: {}", path, e),
			))
		})?;
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		let rpc_url = self.chain.rpc_url.trim();
		if rpc_url.is_empty() {
			return Err(ConfigError::Validation("chain.rpc_url cannot be empty".into()));
		}
		if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
			return Err(ConfigError::Validation(format!(
				"chain.rpc_url must be an http(s) URL, got '{}'",
				rpc_url
			)));
		}

		if self.chain.private_key.is_blank() {
			return Err(ConfigError::Validation(
				"chain.private_key cannot be empty".into(),
			));
		}

		if self.chain.escrow_address.is_zero() {
			return Err(ConfigError::Validation(
				"chain.escrow_address cannot be the zero address".into(),
			));
		}
		if self.chain.token_address.is_zero() {
			return Err(ConfigError::Validation(
				"chain.token_address cannot be the zero address".into(),
			));
		}

		if self.server.port_attempts == 0 {
			return Err(ConfigError::Validation(
				"server.port_attempts must be at least 1".into(),
			));
		}

		if let Some(ref cors) = self.server.cors {
			if cors.allowed_origins.iter().any(|o| o.trim().is_empty()) {
				return Err(ConfigError::Validation(
					"server.cors.allowed_origins cannot contain empty entries".into(),
				));
			}
		}

		if self.stats.data_path.trim().is_empty() {
			return Err(ConfigError::Validation(
				"stats.data_path cannot be empty".into(),
			));
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
