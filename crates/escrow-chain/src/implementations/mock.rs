//! In-memory chain implementations for testing.
//!
//! Every read is backed by an `Option`: `Some` answers with the value, `None`
//! fails the call as if the contract did not implement it. The defaults model
//! a contract that implements nothing. Calls are recorded so tests can assert
//! on the order in which fallbacks were attempted.

use crate::{ChainError, ChainInterface, EscrowBinding, TokenBinding};
use async_trait::async_trait;
use escrow_types::{Address, Bytes, DealWire, NetworkInfo, U256};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records the names of the methods invoked on a mock.
#[derive(Debug, Default)]
pub struct CallLog(Mutex<Vec<&'static str>>);

impl CallLog {
	fn record(&self, method: &'static str) {
		if let Ok(mut calls) = self.0.lock() {
			calls.push(method);
		}
	}

	/// Returns the recorded method names in call order.
	pub fn calls(&self) -> Vec<&'static str> {
		self.0.lock().map(|calls| calls.clone()).unwrap_or_default()
	}
}

fn answer<T: Clone>(value: &Option<T>, method: &'static str) -> Result<T, ChainError> {
	value
		.clone()
		.ok_or_else(|| ChainError::unsupported(method, "execution reverted"))
}

/// Mock chain client.
#[derive(Debug)]
pub struct MockChain {
	/// Network answer; `None` simulates an unreachable endpoint.
	pub network: Option<NetworkInfo>,
	pub native_balance: Option<U256>,
	pub code: Option<Bytes>,
	pub wallet: Address,
	pub log: CallLog,
}

impl Default for MockChain {
	fn default() -> Self {
		Self {
			network: Some(NetworkInfo {
				name: "Mocknet".to_string(),
				chain_id: 31337,
			}),
			native_balance: None,
			code: None,
			wallet: Address::repeat_byte(0xaa),
			log: CallLog::default(),
		}
	}
}

#[async_trait]
impl ChainInterface for MockChain {
	async fn get_network(&self) -> Result<NetworkInfo, ChainError> {
		self.log.record("get_network");
		self.network
			.clone()
			.ok_or_else(|| ChainError::Connection("connection refused".to_string()))
	}

	async fn get_native_balance(&self, _address: Address) -> Result<U256, ChainError> {
		self.log.record("get_native_balance");
		answer(&self.native_balance, "eth_getBalance")
	}

	async fn get_code(&self, _address: Address) -> Result<Bytes, ChainError> {
		self.log.record("get_code");
		answer(&self.code, "eth_getCode")
	}

	fn wallet_address(&self) -> Address {
		self.wallet
	}
}

/// Mock escrow contract.
#[derive(Debug)]
pub struct MockEscrow {
	pub address: Address,
	pub owner: Option<Address>,
	pub total_deals: Option<U256>,
	pub deal_count: Option<U256>,
	/// Deals by id; an id without an entry makes `getDeal` revert.
	pub deals: HashMap<U256, DealWire>,
	pub balance: Option<U256>,
	pub log: CallLog,
}

impl Default for MockEscrow {
	fn default() -> Self {
		Self {
			address: Address::repeat_byte(0xe5),
			owner: None,
			total_deals: None,
			deal_count: None,
			deals: HashMap::new(),
			balance: None,
			log: CallLog::default(),
		}
	}
}

#[async_trait]
impl EscrowBinding for MockEscrow {
	fn address(&self) -> Address {
		self.address
	}

	async fn owner(&self) -> Result<Address, ChainError> {
		self.log.record("owner");
		answer(&self.owner, "owner")
	}

	async fn total_deals(&self) -> Result<U256, ChainError> {
		self.log.record("totalDeals");
		answer(&self.total_deals, "totalDeals")
	}

	async fn deal_count(&self) -> Result<U256, ChainError> {
		self.log.record("dealCount");
		answer(&self.deal_count, "dealCount")
	}

	async fn get_deal(&self, deal_id: U256) -> Result<DealWire, ChainError> {
		self.log.record("getDeal");
		answer(&self.deals.get(&deal_id).cloned(), "getDeal")
	}

	async fn balance_of(&self, _account: Address) -> Result<U256, ChainError> {
		self.log.record("balanceOf");
		answer(&self.balance, "balanceOf")
	}
}

/// Mock token contract.
#[derive(Debug)]
pub struct MockToken {
	pub address: Address,
	pub name: Option<String>,
	pub symbol: Option<String>,
	pub decimals: Option<u8>,
	pub total_supply: Option<U256>,
	/// Token balance reported for any account.
	pub balance: Option<U256>,
	pub log: CallLog,
}

impl Default for MockToken {
	fn default() -> Self {
		Self {
			address: Address::repeat_byte(0x70),
			name: None,
			symbol: None,
			decimals: None,
			total_supply: None,
			balance: None,
			log: CallLog::default(),
		}
	}
}

#[async_trait]
impl TokenBinding for MockToken {
	fn address(&self) -> Address {
		self.address
	}

	async fn name(&self) -> Result<String, ChainError> {
		self.log.record("name");
		answer(&self.name, "name")
	}

	async fn symbol(&self) -> Result<String, ChainError> {
		self.log.record("symbol");
		answer(&self.symbol, "symbol")
	}

	async fn decimals(&self) -> Result<u8, ChainError> {
		self.log.record("decimals");
		answer(&self.decimals, "decimals")
	}

	async fn total_supply(&self) -> Result<U256, ChainError> {
		self.log.record("totalSupply");
		answer(&self.total_supply, "totalSupply")
	}

	async fn balance_of(&self, _account: Address) -> Result<U256, ChainError> {
		self.log.record("balanceOf");
		answer(&self.balance, "balanceOf")
	}
}
