//! HTTP server for the escrow report API.
//!
//! Routes are served under the `/api` base path. The listener binds the
//! configured port, moving on to the following ports while they are taken.

use crate::apis;
use axum::{
	extract::{Path, State},
	http::{HeaderValue, Method},
	response::Json,
	routing::get,
	Router,
};
use escrow_config::{Config, CorsConfig};
use escrow_core::EscrowContext;
use escrow_types::{APIError, DealResponse, ReportResponse, StatsResponse};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Chain handles shared by all requests.
	pub context: Arc<EscrowContext>,
	/// Complete configuration.
	pub config: Arc<Config>,
}

/// Builds the router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
	let cors = cors_layer(state.config.server.cors.as_ref());

	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/report", get(handle_report))
				.route("/report/deal/{deal_id}", get(handle_get_deal))
				.route("/stats", get(handle_stats)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(cors),
		)
		.with_state(state)
}

fn cors_layer(cors: Option<&CorsConfig>) -> CorsLayer {
	let Some(cors) = cors.filter(|c| !c.allowed_origins.is_empty()) else {
		return CorsLayer::permissive();
	};

	let origins: Vec<HeaderValue> = cors
		.allowed_origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(e) => {
				tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
				None
			},
		})
		.collect();

	CorsLayer::new()
		.allow_origin(origins)
		.allow_methods([Method::GET])
		.allow_headers(Any)
}

/// Binds `host:port`, trying up to `attempts` consecutive ports.
///
/// Only "address in use" moves on to the next port; any other bind error is
/// returned immediately.
pub async fn bind_with_fallback(host: &str, port: u16, attempts: u16) -> io::Result<TcpListener> {
	let mut last_err = None;

	for offset in 0..attempts {
		let Some(candidate) = port.checked_add(offset) else {
			break;
		};

		match TcpListener::bind((host, candidate)).await {
			Ok(listener) => return Ok(listener),
			Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
				tracing::warn!(port = candidate, "Port already in use, trying next port");
				last_err = Some(e);
			},
			Err(e) => return Err(e),
		}
	}

	Err(last_err.unwrap_or_else(|| {
		io::Error::new(
			io::ErrorKind::AddrInUse,
			format!("No free port starting at {} after {} attempts", port, attempts),
		)
	}))
}

/// Starts the HTTP server and serves until a shutdown signal arrives.
pub async fn start_server(
	config: Arc<Config>,
	context: Arc<EscrowContext>,
) -> Result<(), Box<dyn std::error::Error>> {
	let server = &config.server;
	let listener = bind_with_fallback(&server.host, server.port, server.port_attempts).await?;
	let address = listener.local_addr()?;

	let app = build_router(AppState {
		context,
		config: Arc::clone(&config),
	});

	tracing::info!("Escrow report API listening on http://{}/api", address);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("Server stopped");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "Failed to listen for ctrl-c");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};

		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			},
			Err(e) => {
				tracing::error!(error = %e, "Failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			},
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("Shutdown signal received");
}

/// Handles GET /api/report requests.
async fn handle_report(State(state): State<AppState>) -> Result<Json<ReportResponse>, APIError> {
	apis::report::get_report(&state.context, &state.config.report)
		.await
		.map(Json)
}

/// Handles GET /api/report/deal/{deal_id} requests.
async fn handle_get_deal(
	Path(deal_id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<DealResponse>, APIError> {
	apis::deal::get_deal_by_id(&state.context, &deal_id)
		.await
		.map(Json)
}

/// Handles GET /api/stats requests.
async fn handle_stats(State(state): State<AppState>) -> Json<StatsResponse> {
	Json(apis::stats::get_stats(&state.config.stats.data_path).await)
}
