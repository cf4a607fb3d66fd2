//! Sentinel-aware field values.
//!
//! Contracts in the wild differ in which read methods they implement. A field
//! whose read failed is still reported, carrying the `"N/A"` sentinel instead
//! of a value, so that every key of a report is always present.

use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel written in place of a value that could not be read.
pub const NOT_AVAILABLE: &str = "N/A";

/// A value read from a remote contract, or the marker that it was unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
	/// The read succeeded.
	Found(T),
	/// Every attempt to read the value failed.
	NotAvailable,
}

impl<T> Probe<T> {
	/// Returns true if a value was read.
	pub fn is_found(&self) -> bool {
		matches!(self, Probe::Found(_))
	}

	/// Returns the value, if any.
	pub fn found(self) -> Option<T> {
		match self {
			Probe::Found(value) => Some(value),
			Probe::NotAvailable => None,
		}
	}
}

impl<T: fmt::Display> fmt::Display for Probe<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Probe::Found(value) => write!(f, "{}", value),
			Probe::NotAvailable => f.write_str(NOT_AVAILABLE),
		}
	}
}

impl<T: Serialize> Serialize for Probe<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Probe::Found(value) => value.serialize(serializer),
			Probe::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
		}
	}
}
