//! Common types module for the escrow report service.
//!
//! This module defines the data model shared by the chain, core and service
//! crates: report snapshots, deal records, API envelopes and the helpers used
//! to render on-chain amounts for display.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Deal record types and the raw wire shapes they are decoded from.
pub mod deal;
/// Field values that may be unavailable on the remote contract.
pub mod probe;
/// Escrow report snapshot types.
pub mod report;
/// Secret string type for private keys.
pub mod secret_string;
/// Local item statistics types.
pub mod stats;
/// Utility functions for formatting and timestamps.
pub mod utils;

// Re-export all types for convenient access
pub use api::*;
pub use deal::{DealRecord, DealWire};
pub use probe::{Probe, NOT_AVAILABLE};
pub use report::*;
pub use secret_string::SecretString;
pub use stats::{ItemStats, UNREADABLE_NOTE};
pub use utils::{format_native, format_units, iso_timestamp};

pub use alloy::primitives::{Address, Bytes, B256, U256};
