use crate::handlers::{events, health};
use crate::AppState;
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;

pub fn post_events<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/events", post(events::publish_event))
		.route("/events/bulk", post(events::publish_bulk))
}

pub fn get_health<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new().route("/health", get(health::health))
}
