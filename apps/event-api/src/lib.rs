//! HTTP ingestion service for analytics events.
//!
//! Events are validated against the server clock, given a random id, and published onto a
//! durable queue for asynchronous processing. Bulk submissions are processed item by item so
//! one bad event never sinks the batch.

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod metrics;
pub mod publisher;
pub mod routes;
pub mod service;
pub mod validation;

pub use config::Config;
pub use error::ApiError;
pub use service::{BulkItemError, BulkResult, EventService, IngestError};

use crate::clock::Clock;
use crate::error::handle_tower_error;
use crate::publisher::QueuePublisher;
use axum::{error_handling::HandleErrorLayer, routing::get, Router};
use event_queue::QueueClient;
use std::sync::Arc;
use std::time::Duration;
use tower::{limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
	pub service: EventService,
	pub max_bulk_events: usize,
}

impl AppState {
	/// Wires the ingestion service onto a shared queue client.
	pub fn new(client: Arc<dyn QueueClient>, clock: Arc<dyn Clock>, max_bulk_events: usize) -> Self {
		let publisher = Arc::new(QueuePublisher::new(client));

		Self {
			service: EventService::new(publisher, clock),
			max_bulk_events,
		}
	}
}

/// Builds the full application router with its middleware stack.
pub fn app(state: AppState, config: &Config) -> Router {
	let public_routes = Router::new().route("/metrics", get(metrics::http::metrics_handler));

	Router::new()
		.merge(routes::post_events())
		.merge(routes::get_health())
		.merge(public_routes)
		.with_state(state)
		.layer(
			ServiceBuilder::new()
				.layer(axum::middleware::from_fn(metrics::http::metrics_middleware))
				.layer(TraceLayer::new_for_http())
				.layer(HandleErrorLayer::new(|error: BoxError| async move { handle_tower_error(error).await }))
				.layer(RequestBodyLimitLayer::new(config.max_request_size_bytes()))
				.layer(LoadShedLayer::new())
				.layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
				.layer(TimeoutLayer::new(Duration::from_millis(config.request_timeout_ms))),
		)
}
