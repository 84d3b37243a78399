use crate::metrics::events::EVENT_PUBLISH_DURATION;
use analytics_events::{EnvelopeError, Event, EventEnvelope};
use event_queue::{OutboundMessage, QueueClient, QueueError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
	#[error("failed to encode event: {0}")]
	Serialization(#[from] EnvelopeError),

	#[error("failed to enqueue event: {0}")]
	Queue(#[from] QueueError),
}

/// Hands an accepted event to durable delivery.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync + 'static {
	/// Makes exactly one delivery attempt for `event` under `event_id`.
	async fn publish(&self, event: Event, event_id: &str) -> Result<(), PublishError>;
}

/// Publishes events as JSON envelopes onto a [`QueueClient`], tagged with the
/// `EventName` and `Channel` message attributes.
#[derive(Clone)]
pub struct QueuePublisher {
	client: Arc<dyn QueueClient>,
}

impl QueuePublisher {
	pub fn new(client: Arc<dyn QueueClient>) -> Self {
		Self { client }
	}
}

fn build_message(envelope: &EventEnvelope) -> Result<OutboundMessage, EnvelopeError> {
	let body = envelope.to_json()?;

	Ok(envelope
		.attributes()
		.into_iter()
		.fold(OutboundMessage::new(body), |message, (name, value)| message.with_attribute(name, value)))
}

#[async_trait::async_trait]
impl EventPublisher for QueuePublisher {
	async fn publish(&self, event: Event, event_id: &str) -> Result<(), PublishError> {
		let envelope = EventEnvelope::new(event_id, event);
		let message = build_message(&envelope)?;

		let timer = EVENT_PUBLISH_DURATION.start_timer();
		let result = self.client.send(message).await;
		timer.observe_duration();

		let message_id = result?;
		tracing::debug!(event_id, message_id = %message_id, queue_url = self.client.queue_url(), "Event enqueued");

		Ok(())
	}
}
