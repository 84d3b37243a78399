use crate::error::ApiError;
use crate::service::BulkResult;
use crate::AppState;
use analytics_events::Event;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Serialize)]
pub struct PublishEventResponse {
	pub event_id: String,
	pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct BulkEventsRequest {
	pub events: Vec<Event>,
}

#[instrument(name = "publish_event", skip_all, fields(event_name = %event.event_name, channel = %event.channel))]
pub async fn publish_event(State(state): State<AppState>, Json(event): Json<Event>) -> Result<(StatusCode, Json<PublishEventResponse>), ApiError> {
	let event_id = state.service.process_event(event).await?;

	tracing::info!(event_id = %event_id, "📥 Event accepted");

	Ok((StatusCode::ACCEPTED, Json(PublishEventResponse { event_id, status: "accepted" })))
}

#[instrument(name = "publish_bulk", skip_all, fields(count = request.events.len()))]
pub async fn publish_bulk(State(state): State<AppState>, Json(request): Json<BulkEventsRequest>) -> Result<(StatusCode, Json<BulkResult>), ApiError> {
	if request.events.is_empty() {
		return Err(ApiError::BadRequest("events must not be empty".to_string()));
	}

	if request.events.len() > state.max_bulk_events {
		return Err(ApiError::BadRequest(format!(
			"too many events: {} > {}",
			request.events.len(),
			state.max_bulk_events
		)));
	}

	let result = state.service.process_bulk(request.events).await;

	Ok((StatusCode::ACCEPTED, Json(result)))
}
