//! Local item statistics types.

use serde::Serialize;
use std::collections::BTreeMap;

/// Note attached to the stats when the item file cannot be used.
pub const UNREADABLE_NOTE: &str = "Unable to read local data";

/// Aggregate statistics over the local item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
	pub total_items: usize,
	pub timestamp: String,
	/// Origin of the data; always "local".
	pub source: String,
	/// Item count per category, present when items carry a category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub categories: Option<BTreeMap<String, usize>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

impl ItemStats {
	/// Stats reported in place of an error when the item file is unusable.
	pub fn unavailable(timestamp: String) -> Self {
		Self {
			total_items: 0,
			timestamp,
			source: "local".to_string(),
			categories: None,
			note: Some(UNREADABLE_NOTE.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_unavailable_omits_categories() {
		let stats = ItemStats::unavailable("2024-01-01T00:00:00.000Z".to_string());
		let value = serde_json::to_value(&stats).unwrap();

		assert_eq!(value["totalItems"], json!(0));
		assert_eq!(value["note"], json!("Unable to read local data"));
		assert_eq!(value["source"], json!("local"));
		assert!(value.get("categories").is_none());
	}
}
