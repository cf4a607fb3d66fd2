//! Amount formatting utilities.
//!
//! Converts raw on-chain integer amounts into human-readable decimal strings.

use alloy::primitives::U256;

/// Decimal exponent of the chain's native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Formats a raw token amount with decimal places for display.
///
/// Trailing zeros of the fractional part are trimmed, but at least one
/// fractional digit is always kept.
///
/// # Arguments
///
/// * `amount` - The raw amount in the token's smallest unit
/// * `decimals` - The number of decimal places for the token
///
/// # Returns
///
/// A formatted string like "1.5" or "1000.0"
pub fn format_units(amount: U256, decimals: u8) -> String {
	let digits = amount.to_string();
	let decimal_places = decimals as usize;

	// Handle amounts smaller than 1 token
	let (integer_part, decimal_part) = if digits.len() <= decimal_places {
		let decimal_str = format!("{:0>width$}", digits, width = decimal_places);
		("0".to_string(), decimal_str)
	} else {
		let split_pos = digits.len() - decimal_places;
		(
			digits[..split_pos].to_string(),
			digits[split_pos..].to_string(),
		)
	};

	let decimal_trimmed = decimal_part.trim_end_matches('0');

	if decimal_trimmed.is_empty() {
		format!("{}.0", integer_part)
	} else {
		format!("{}.{}", integer_part, decimal_trimmed)
	}
}

/// Formats a native currency amount given in its smallest unit (wei).
pub fn format_native(amount: U256) -> String {
	format_units(amount, NATIVE_DECIMALS)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn units(raw: &str, decimals: u8) -> String {
		format_units(U256::from_str_radix(raw, 10).unwrap(), decimals)
	}

	#[test]
	fn test_format_units() {
		// 18 decimals
		assert_eq!(units("1000000000000000000", 18), "1.0");
		assert_eq!(units("1500000000000000000", 18), "1.5");
		assert_eq!(units("100000000000000000", 18), "0.1");
		assert_eq!(units("1", 18), "0.000000000000000001");

		// 6 decimals
		assert_eq!(units("1000000", 6), "1.0");
		assert_eq!(units("1234567", 6), "1.234567");

		// 0 decimals
		assert_eq!(units("1000", 0), "1000.0");

		// Large amounts
		assert_eq!(units("102000000000000000000", 18), "102.0");
	}

	#[test]
	fn test_format_zero() {
		assert_eq!(format_native(U256::ZERO), "0.0");
		assert_eq!(format_units(U256::ZERO, 0), "0.0");
	}
}
