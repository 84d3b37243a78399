use crate::handoff::HandoffSender;
use event_queue::{QueueClient, QueueMessage, ReceiveRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle of a [`QueueReceiver`]. There is no error state: receive failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
	Idle,
	Polling,
	Forwarding,
	ShuttingDown,
	Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
	/// Upper bound on messages per long-poll
	pub max_messages: u32,
	/// Long-poll wait time
	pub wait_time: Duration,
	/// Fixed delay after a failed receive
	pub backoff: Duration,
}

impl Default for ReceiverConfig {
	fn default() -> Self {
		Self {
			max_messages: 10,
			wait_time: Duration::from_secs(20),
			backoff: Duration::from_secs(1),
		}
	}
}

/// Long-polls a queue and forwards every received message, in order, into a hand-off queue.
pub struct QueueReceiver {
	client: Arc<dyn QueueClient>,
	config: ReceiverConfig,
	cancel: CancellationToken,
	state: watch::Sender<ReceiverState>,
}

impl QueueReceiver {
	pub fn new(client: Arc<dyn QueueClient>, config: ReceiverConfig, cancel: CancellationToken) -> Self {
		let (state, _) = watch::channel(ReceiverState::Idle);

		Self { client, config, cancel, state }
	}

	/// Subscribes to state transitions.
	pub fn state(&self) -> watch::Receiver<ReceiverState> {
		self.state.subscribe()
	}

	fn transition(&self, next: ReceiverState) {
		self.state.send_replace(next);
	}

	/// Runs until cancelled or until every hand-off consumer is gone, then closes `out`.
	pub async fn run(self, mut out: HandoffSender<QueueMessage>) {
		let request = ReceiveRequest::new(self.config.max_messages, self.config.wait_time);

		info!(
			queue_url = self.client.queue_url(),
			max_messages = self.config.max_messages,
			wait_time_secs = self.config.wait_time.as_secs(),
			"🚀 Queue receiver started"
		);

		while !self.cancel.is_cancelled() {
			self.transition(ReceiverState::Polling);

			let received = tokio::select! {
				biased;
				() = self.cancel.cancelled() => break,
				received = self.client.receive(&request) => received,
			};

			match received {
				Ok(messages) if messages.is_empty() => {}
				Ok(messages) => {
					self.transition(ReceiverState::Forwarding);
					debug!(count = messages.len(), "Forwarding received messages");

					if !self.forward(&out, messages).await {
						break;
					}
				}
				Err(e) => {
					warn!(error = %e, backoff = ?self.config.backoff, "⚠️ Failed to receive messages, retrying after backoff");

					tokio::select! {
						biased;
						() = self.cancel.cancelled() => break,
						() = tokio::time::sleep(self.config.backoff) => {}
					}
				}
			}
		}

		self.transition(ReceiverState::ShuttingDown);
		out.close();
		self.transition(ReceiverState::Stopped);

		info!("🛑 Queue receiver stopped");
	}

	/// Pushes each message in order. Returns `false` when the receiver should stop.
	async fn forward(&self, out: &HandoffSender<QueueMessage>, messages: Vec<QueueMessage>) -> bool {
		for message in messages {
			let sent = tokio::select! {
				biased;
				() = self.cancel.cancelled() => return false,
				sent = out.send(message) => sent,
			};

			if let Err(e) = sent {
				warn!(error = %e, "Hand-off queue unavailable, stopping receiver");
				return false;
			}
		}

		true
	}
}
