use crate::clock::Clock;
use crate::ids::new_event_id;
use crate::metrics::events::{record_accepted, record_rejected};
use crate::publisher::{EventPublisher, PublishError};
use crate::validation::{validate, ValidationError};
use analytics_events::Event;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error(transparent)]
	Publish(#[from] PublishError),
}

impl IngestError {
	/// Metric label for the rejection.
	pub const fn reason(&self) -> &'static str {
		match self {
			Self::Validation(_) => "validation",
			Self::Publish(_) => "publish",
		}
	}
}

/// A rejected bulk item, correlated by its position in the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItemError {
	pub index: usize,
	pub message: String,
}

/// Outcome of a bulk submission. `accepted + rejected` always equals the submission length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkResult {
	pub accepted: usize,
	pub rejected: usize,
	pub event_ids: Vec<String>,
	pub errors: Vec<BulkItemError>,
}

/// Validates, identifies and publishes events.
#[derive(Clone)]
pub struct EventService {
	publisher: Arc<dyn EventPublisher>,
	clock: Arc<dyn Clock>,
}

impl EventService {
	pub fn new(publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
		Self { publisher, clock }
	}

	/// Ingests a single event and returns its assigned id.
	///
	/// Nothing is published when validation fails.
	pub async fn process_event(&self, event: Event) -> Result<String, IngestError> {
		let result = self.ingest(event).await;

		match &result {
			Ok(_) => record_accepted(),
			Err(e) => record_rejected(e.reason()),
		}

		result
	}

	/// Ingests every event independently, in submission order.
	///
	/// A failing item is recorded in the result and never stops the remaining items.
	pub async fn process_bulk(&self, events: Vec<Event>) -> BulkResult {
		let mut result = BulkResult::default();

		for (index, event) in events.into_iter().enumerate() {
			match self.process_event(event).await {
				Ok(event_id) => {
					result.accepted += 1;
					result.event_ids.push(event_id);
				}
				Err(e) => {
					tracing::warn!(index, error = %e, "Failed to process event at index {index}");
					result.rejected += 1;
					result.errors.push(BulkItemError { index, message: e.to_string() });
				}
			}
		}

		tracing::info!(accepted = result.accepted, rejected = result.rejected, "Bulk submission processed");
		result
	}

	async fn ingest(&self, event: Event) -> Result<String, IngestError> {
		let now = self.clock.now();
		validate(&event, now)?;

		let event_id = new_event_id();
		self.publisher.publish(event, &event_id).await?;

		Ok(event_id)
	}
}
