use analytics_events::EnvelopeError;
use event_queue::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
	#[error("Failed to decode message body: {0}")]
	Decode(#[from] EnvelopeError),

	#[error("Queue error: {0}")]
	Queue(#[from] QueueError),

	#[error("Invalid configuration: {0}")]
	Config(String),
}
