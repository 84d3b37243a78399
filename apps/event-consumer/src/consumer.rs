use crate::handoff;
use crate::processor::{spawn_workers, MessageHandler};
use crate::receiver::{QueueReceiver, ReceiverConfig};
use event_queue::QueueClient;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerSettings {
	pub receiver: ReceiverConfig,
	/// Capacity of the hand-off queue between receiver and workers
	pub buffer_size: usize,
	pub workers: usize,
	/// How long workers may keep draining once the receiver has stopped
	pub shutdown_timeout: Duration,
}

impl Default for ConsumerSettings {
	fn default() -> Self {
		Self {
			receiver: ReceiverConfig::default(),
			buffer_size: 100,
			workers: 4,
			shutdown_timeout: Duration::from_secs(10),
		}
	}
}

/// Wires the receive loop, the hand-off queue and the worker pool.
pub struct Consumer {
	client: Arc<dyn QueueClient>,
	handler: Arc<dyn MessageHandler>,
	settings: ConsumerSettings,
}

impl Consumer {
	pub fn new(client: Arc<dyn QueueClient>, handler: Arc<dyn MessageHandler>, settings: ConsumerSettings) -> Self {
		Self { client, handler, settings }
	}

	/// Runs until `cancel` fires, then lets the workers drain what was already handed off.
	pub async fn run(self, cancel: CancellationToken) {
		let (tx, rx) = handoff::channel(self.settings.buffer_size);
		let receiver = QueueReceiver::new(Arc::clone(&self.client), self.settings.receiver.clone(), cancel);

		let mut workers = spawn_workers(self.settings.workers, &rx, &self.handler, &self.client);
		drop(rx);

		info!(workers = self.settings.workers, buffer_size = self.settings.buffer_size, "✅ Consumer running");

		if let Err(e) = tokio::spawn(receiver.run(tx)).await {
			error!(error = %e, "Queue receiver task failed");
		}

		let drain = async {
			while let Some(joined) = workers.join_next().await {
				if let Err(e) = joined {
					warn!(error = %e, "Worker task failed");
				}
			}
		};

		if tokio::time::timeout(self.settings.shutdown_timeout, drain).await.is_err() {
			error!("Shutdown timeout - aborting workers");
			workers.abort_all();
		}

		info!("🛑 Consumer stopped");
	}
}
