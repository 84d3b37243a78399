use crate::error::ConsumerError;
use crate::handoff::HandoffReceiver;
use analytics_events::EventEnvelope;
use event_queue::{QueueClient, QueueMessage};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Downstream stage for a single received message.
#[async_trait::async_trait]
pub trait MessageHandler: Send + Sync + 'static {
	/// Returning `Ok` acknowledges the message; an error leaves it for redelivery.
	async fn handle(&self, message: &QueueMessage) -> Result<(), ConsumerError>;
}

/// Decodes each body as an [`EventEnvelope`] and logs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeLogger;

#[async_trait::async_trait]
impl MessageHandler for EnvelopeLogger {
	async fn handle(&self, message: &QueueMessage) -> Result<(), ConsumerError> {
		let envelope = EventEnvelope::from_json(&message.body)?;

		info!(
			event_id = %envelope.event_id,
			event_name = %envelope.event.event_name,
			channel = %envelope.event.channel,
			timestamp = envelope.event.timestamp,
			message_id = ?message.message_id,
			"📥 Event received"
		);

		Ok(())
	}
}

/// Spawns `count` workers draining `receiver` until it reports end-of-stream.
pub fn spawn_workers(count: usize, receiver: &HandoffReceiver<QueueMessage>, handler: &Arc<dyn MessageHandler>, client: &Arc<dyn QueueClient>) -> JoinSet<()> {
	let mut workers = JoinSet::new();

	for worker_id in 0..count {
		workers.spawn(run_worker(worker_id, receiver.clone(), Arc::clone(handler), Arc::clone(client)));
	}

	workers
}

async fn run_worker(worker_id: usize, receiver: HandoffReceiver<QueueMessage>, handler: Arc<dyn MessageHandler>, client: Arc<dyn QueueClient>) {
	debug!(worker_id, "Worker started");

	while let Some(message) = receiver.recv().await {
		match handler.handle(&message).await {
			Ok(()) => acknowledge(client.as_ref(), &message).await,
			Err(e) => warn!(worker_id, error = %e, message_id = ?message.message_id, "⚠️ Message handling failed, leaving it for redelivery"),
		}
	}

	debug!(worker_id, "Worker finished");
}

async fn acknowledge(client: &dyn QueueClient, message: &QueueMessage) {
	let Some(receipt_handle) = message.receipt_handle.as_deref() else {
		warn!(message_id = ?message.message_id, "Message has no receipt handle, cannot acknowledge");
		return;
	};

	if let Err(e) = client.delete(receipt_handle).await {
		warn!(error = %e, message_id = ?message.message_id, "Failed to acknowledge message");
	}
}
