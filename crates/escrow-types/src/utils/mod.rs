//! Utility functions for common formatting and timestamps.

pub mod formatting;
pub mod helpers;

pub use formatting::{format_native, format_units};
pub use helpers::iso_timestamp;
