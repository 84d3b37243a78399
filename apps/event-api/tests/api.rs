use analytics_events::EventEnvelope;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use clap::Parser;
use event_api::clock::FixedClock;
use event_api::{app, AppState, Config};
use event_queue::{InMemQueue, QueueClient, ReceiveRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const NOW: i64 = 1_700_000_000;

fn test_app(queue: &InMemQueue, max_bulk_events: usize) -> Router {
	let config = Config::try_parse_from(["event-api"]).unwrap();
	let state = AppState::new(Arc::new(queue.clone()), Arc::new(FixedClock(NOW)), max_bulk_events);
	app(state, &config)
}

async fn call(app: Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value, String) {
	let request = Request::builder()
		.method(method)
		.uri(uri)
		.header(CONTENT_TYPE, "application/json")
		.body(body.map_or_else(Body::empty, Body::from))
		.unwrap();

	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let text = String::from_utf8_lossy(&bytes).to_string();
	let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

	(status, json, text)
}

async fn drain(queue: &InMemQueue) -> Vec<event_queue::QueueMessage> {
	queue.receive(&ReceiveRequest::new(10, Duration::ZERO)).await.unwrap()
}

#[tokio::test]
async fn test_single_event_is_accepted_and_enqueued() {
	let queue = InMemQueue::new("inmem://events");
	let body = json!({"event_name": "click", "channel": "web", "timestamp": NOW}).to_string();

	let (status, json, _) = call(test_app(&queue, 1000), Method::POST, "/events", Some(body)).await;

	assert_eq!(status, StatusCode::ACCEPTED);
	assert_eq!(json["status"], "accepted");
	let event_id = json["event_id"].as_str().unwrap();
	assert!(!event_id.is_empty());

	let messages = drain(&queue).await;
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].attribute("EventName"), Some("click"));
	assert_eq!(messages[0].attribute("Channel"), Some("web"));

	let envelope = EventEnvelope::from_json(&messages[0].body).unwrap();
	assert_eq!(envelope.event_id, event_id);
	assert!(envelope.event.tags.is_empty());
	assert!(envelope.event.metadata.is_empty());
}

#[tokio::test]
async fn test_future_event_is_rejected_and_not_enqueued() {
	let queue = InMemQueue::new("inmem://events");
	let body = json!({"event_name": "click", "channel": "web", "timestamp": NOW + 3600}).to_string();

	let (status, json, _) = call(test_app(&queue, 1000), Method::POST, "/events", Some(body)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "validation_error");
	assert!(json["message"].as_str().unwrap().contains("timestamp cannot be in the future"));
	assert_eq!(queue.pending().await, 0);
}

#[tokio::test]
async fn test_event_too_large_for_queue_is_rejected_and_not_enqueued() {
	let queue = InMemQueue::new("inmem://events");
	let body = json!({
		"event_name": "click",
		"channel": "web",
		"timestamp": NOW,
		"metadata": {"blob": "x".repeat(300 * 1024)}
	})
	.to_string();

	let (status, json, _) = call(test_app(&queue, 1000), Method::POST, "/events", Some(body)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "validation_error");
	assert!(json["message"].as_str().unwrap().contains("event too large"));
	assert_eq!(queue.pending().await, 0);
}

#[tokio::test]
async fn test_bulk_isolates_failing_item() {
	let queue = InMemQueue::new("inmem://events");
	let body = json!({
		"events": [
			{"event_name": "a", "channel": "web", "timestamp": NOW},
			{"event_name": "b", "channel": "web", "timestamp": NOW + 3600},
			{"event_name": "c", "channel": "ios", "timestamp": NOW - 5, "tags": ["x"]}
		]
	})
	.to_string();

	let (status, json, _) = call(test_app(&queue, 1000), Method::POST, "/events/bulk", Some(body)).await;

	assert_eq!(status, StatusCode::ACCEPTED);
	assert_eq!(json["accepted"], 2);
	assert_eq!(json["rejected"], 1);
	assert_eq!(json["event_ids"].as_array().unwrap().len(), 2);
	assert_eq!(json["errors"].as_array().unwrap().len(), 1);
	assert_eq!(json["errors"][0]["index"], 1);

	let names: Vec<_> = drain(&queue).await.iter().map(|m| m.attribute("EventName").unwrap_or_default().to_string()).collect();
	assert_eq!(names, vec!["a", "c"]);
}

#[tokio::test]
async fn test_bulk_rejects_empty_and_oversized_batches() {
	let queue = InMemQueue::new("inmem://events");
	let event = json!({"event_name": "a", "channel": "web", "timestamp": NOW});

	let (status, json, _) = call(test_app(&queue, 2), Method::POST, "/events/bulk", Some(json!({"events": []}).to_string())).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "bad_request");

	let oversized = json!({"events": [event.clone(), event.clone(), event]}).to_string();
	let (status, json, _) = call(test_app(&queue, 2), Method::POST, "/events/bulk", Some(oversized)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "bad_request");

	assert_eq!(queue.pending().await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected_before_ingestion() {
	let queue = InMemQueue::new("inmem://events");

	let (status, _, _) = call(test_app(&queue, 1000), Method::POST, "/events", Some("{not json".to_string())).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(queue.pending().await, 0);
}

#[tokio::test]
async fn test_health() {
	let queue = InMemQueue::new("inmem://events");

	let (status, json, _) = call(test_app(&queue, 1000), Method::GET, "/health", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["service"], "event-api");
	assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_exposes_event_counters() {
	let queue = InMemQueue::new("inmem://events");
	let body = json!({"event_name": "click", "channel": "web", "timestamp": NOW}).to_string();
	call(test_app(&queue, 1000), Method::POST, "/events", Some(body)).await;

	let (status, _, text) = call(test_app(&queue, 1000), Method::GET, "/metrics", None).await;

	assert_eq!(status, StatusCode::OK);
	assert!(text.contains("events_accepted_total"));
	assert!(text.contains("event_publish_duration_seconds"));
}
