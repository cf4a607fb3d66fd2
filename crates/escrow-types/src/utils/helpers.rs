//! Helper utilities.

use chrono::{SecondsFormat, Utc};

/// Current UTC time in ISO-8601 form with millisecond precision,
/// e.g. `2024-05-01T12:30:00.000Z`.
pub fn iso_timestamp() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_iso_timestamp_shape() {
		let ts = iso_timestamp();
		assert!(ts.ends_with('Z'));
		assert_eq!(ts.len(), "2024-05-01T12:30:00.000Z".len());
		assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
	}
}
