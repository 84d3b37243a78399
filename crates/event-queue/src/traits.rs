use crate::error::Result;
use crate::message::{OutboundMessage, QueueMessage, ReceiveRequest};

/// Core queue interface that all implementations must satisfy.
///
/// Delivery is at-least-once: a received message stays owned by the queue until it is
/// deleted, and may be delivered again if it never is.
#[async_trait::async_trait]
pub trait QueueClient: Send + Sync + 'static {
	/// Enqueues a single message and returns the id the queue assigned to it.
	///
	/// Implementations make exactly one attempt; retrying is the caller's decision.
	async fn send(&self, message: OutboundMessage) -> Result<String>;

	/// Long-polls for a batch of messages.
	///
	/// Returns as soon as at least one message is available, or an empty batch once
	/// `request.wait_time` elapses with nothing to deliver.
	async fn receive(&self, request: &ReceiveRequest) -> Result<Vec<QueueMessage>>;

	/// Acknowledges a delivered message so it is not redelivered.
	async fn delete(&self, receipt_handle: &str) -> Result<()>;

	/// Returns the address of the queue this client talks to.
	fn queue_url(&self) -> &str;
}
