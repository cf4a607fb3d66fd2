//! HTTP API handlers.
//!
//! Each submodule maps one endpoint onto the core read operations and
//! translates their failures into [`escrow_types::APIError`].

pub mod deal;
pub mod report;
pub mod stats;

use std::error::Error;

/// Renders an error and its sources as `outer: inner: ...`.
pub(crate) fn error_chain(err: &dyn Error) -> String {
	let mut rendered = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		rendered.push_str(": ");
		rendered.push_str(&cause.to_string());
		source = cause.source();
	}
	rendered
}
