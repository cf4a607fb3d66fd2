//! Local item statistics.
//!
//! Reads the configured item file and summarises it. The endpoint never
//! fails: an unreadable file yields zeroed stats with an explanatory note.

use escrow_types::{iso_timestamp, ItemStats, StatsResponse};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading the item file.
#[derive(Debug, Error)]
pub enum StatsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Item data must be a JSON array")]
	NotAnArray,
}

/// Computes statistics over the JSON array stored at `path`.
///
/// Categories are counted only when the first item carries a string
/// `category`; items without one are left out of the breakdown.
pub async fn compute_stats(path: &Path) -> Result<ItemStats, StatsError> {
	let raw = tokio::fs::read_to_string(path).await?;
	let Value::Array(items) = serde_json::from_str::<Value>(&raw)? else {
		return Err(StatsError::NotAnArray);
	};

	let has_categories = items
		.first()
		.and_then(|item| item.get("category"))
		.is_some_and(Value::is_string);

	let categories = has_categories.then(|| {
		let mut counts = BTreeMap::new();
		for category in items
			.iter()
			.filter_map(|item| item.get("category").and_then(Value::as_str))
		{
			*counts.entry(category.to_string()).or_insert(0) += 1;
		}
		counts
	});

	Ok(ItemStats {
		total_items: items.len(),
		timestamp: iso_timestamp(),
		source: "local".to_string(),
		categories,
		note: None,
	})
}

/// Handles GET /api/stats.
pub async fn get_stats(data_path: &str) -> StatsResponse {
	let stats = match compute_stats(Path::new(data_path)).await {
		Ok(stats) => stats,
		Err(e) => {
			tracing::warn!(path = %data_path, error = %e, "Failed to read item data");
			ItemStats::unavailable(iso_timestamp())
		},
	};

	StatsResponse {
		success: true,
		stats,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn data_file(content: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn test_counts_categories() {
		let file = data_file(
			r#"[
				{"id": 1, "name": "Laptop", "category": "Electronics"},
				{"id": 2, "name": "Desk", "category": "Furniture"},
				{"id": 3, "name": "Phone", "category": "Electronics"},
				{"id": 4, "name": "Mystery"}
			]"#,
		);

		let stats = compute_stats(file.path()).await.unwrap();
		assert_eq!(stats.total_items, 4);
		assert_eq!(stats.source, "local");

		let categories = stats.categories.unwrap();
		assert_eq!(categories.get("Electronics"), Some(&2));
		assert_eq!(categories.get("Furniture"), Some(&1));
		assert_eq!(categories.len(), 2);
	}

	#[tokio::test]
	async fn test_categories_require_first_item_category() {
		let file = data_file(r#"[{"id": 1}, {"id": 2, "category": "Books"}]"#);

		let stats = compute_stats(file.path()).await.unwrap();
		assert_eq!(stats.total_items, 2);
		assert!(stats.categories.is_none());
	}

	#[tokio::test]
	async fn test_empty_array() {
		let file = data_file("[]");

		let stats = compute_stats(file.path()).await.unwrap();
		assert_eq!(stats.total_items, 0);
		assert!(stats.categories.is_none());
		assert!(stats.note.is_none());
	}

	#[tokio::test]
	async fn test_rejects_non_array() {
		let file = data_file(r#"{"items": []}"#);
		assert!(matches!(
			compute_stats(file.path()).await,
			Err(StatsError::NotAnArray)
		));

		let garbage = data_file("not json");
		assert!(matches!(
			compute_stats(garbage.path()).await,
			Err(StatsError::Json(_))
		));
	}

	#[tokio::test]
	async fn test_missing_file_degrades() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.json");

		let response = get_stats(path.to_str().unwrap()).await;
		assert!(response.success);
		assert_eq!(response.stats.total_items, 0);
		assert_eq!(response.stats.note.as_deref(), Some("Unable to read local data"));
	}
}
