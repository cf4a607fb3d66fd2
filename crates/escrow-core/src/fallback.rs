//! Sequential fallback over remote reads.
//!
//! A [`FallbackChain`] holds an ordered list of named probes for one field.
//! Probes are futures that have not been polled yet, so a later probe is
//! never issued once an earlier one has succeeded.

use escrow_chain::ChainError;
use escrow_types::Probe;
use futures::future::BoxFuture;
use std::future::Future;

/// Ordered list of attempts to read a single field.
pub struct FallbackChain<'a, T> {
	field: &'static str,
	probes: Vec<(&'static str, BoxFuture<'a, Result<T, ChainError>>)>,
}

impl<'a, T> FallbackChain<'a, T> {
	/// Starts an empty chain for the named field.
	pub fn new(field: &'static str) -> Self {
		Self {
			field,
			probes: Vec::new(),
		}
	}

	/// Appends a probe, tried only if every earlier probe failed.
	pub fn probe<F>(mut self, name: &'static str, fut: F) -> Self
	where
		F: Future<Output = Result<T, ChainError>> + Send + 'a,
	{
		self.probes.push((name, Box::pin(fut)));
		self
	}

	/// Evaluates the probes in order and returns the first success.
	pub async fn resolve(self) -> Probe<T> {
		for (name, fut) in self.probes {
			match fut.await {
				Ok(value) => return Probe::Found(value),
				Err(e) => {
					tracing::debug!(field = self.field, probe = name, error = %e, "Probe failed");
				},
			}
		}

		tracing::debug!(field = self.field, "No probe succeeded, value not available");
		Probe::NotAvailable
	}

	/// Like [`resolve`](Self::resolve), substituting `default` on exhaustion.
	pub async fn resolve_or(self, default: T) -> T {
		self.resolve().await.found().unwrap_or(default)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn fail(method: &'static str) -> ChainError {
		ChainError::unsupported(method, "execution reverted")
	}

	#[tokio::test]
	async fn test_first_success_wins() {
		let result = FallbackChain::new("count")
			.probe("a", async { Ok(1u32) })
			.probe("b", async { Ok(2u32) })
			.resolve()
			.await;
		assert_eq!(result, Probe::Found(1));
	}

	#[tokio::test]
	async fn test_later_probe_not_polled_after_success() {
		let polled = AtomicUsize::new(0);
		let result = FallbackChain::new("count")
			.probe("a", async { Err(fail("a")) })
			.probe("b", async { Ok(2u32) })
			.probe("c", async {
				polled.fetch_add(1, Ordering::SeqCst);
				Ok(3u32)
			})
			.resolve()
			.await;

		assert_eq!(result, Probe::Found(2));
		assert_eq!(polled.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_exhaustion() {
		let result: Probe<u32> = FallbackChain::new("count")
			.probe("a", async { Err(fail("a")) })
			.resolve()
			.await;
		assert_eq!(result, Probe::NotAvailable);

		let value = FallbackChain::new("decimals")
			.probe("a", async { Err(fail("a")) })
			.resolve_or(18u8)
			.await;
		assert_eq!(value, 18);

		let empty: Probe<u32> = FallbackChain::new("nothing").resolve().await;
		assert_eq!(empty, Probe::NotAvailable);
	}
}
