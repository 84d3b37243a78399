#![cfg(feature = "inmem")]

use crate::error::{QueueError, Result};
use crate::message::{OutboundMessage, QueueMessage, ReceiveRequest};
use crate::traits::QueueClient;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::time::{timeout_at, Instant};

#[derive(Default)]
struct State {
	pending: VecDeque<QueueMessage>,
	in_flight: HashMap<String, QueueMessage>,
}

struct Inner {
	url: String,
	state: Mutex<State>,
	arrivals: Notify,
	next_message: AtomicU64,
	next_receipt: AtomicU64,
}

/// In-memory queue with long-poll receive and delete-to-acknowledge semantics.
///
/// Cloning is cheap; all clones share the same queue.
#[derive(Clone)]
pub struct InMemQueue {
	inner: Arc<Inner>,
}

impl InMemQueue {
	#[must_use]
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			inner: Arc::new(Inner {
				url: url.into(),
				state: Mutex::new(State::default()),
				arrivals: Notify::new(),
				next_message: AtomicU64::new(1),
				next_receipt: AtomicU64::new(1),
			}),
		}
	}

	/// Number of messages waiting to be received.
	pub async fn pending(&self) -> usize {
		self.inner.state.lock().await.pending.len()
	}

	/// Number of messages received but not yet deleted.
	pub async fn in_flight(&self) -> usize {
		self.inner.state.lock().await.in_flight.len()
	}

	async fn take_batch(&self, max_messages: usize) -> Vec<QueueMessage> {
		let mut guard = self.inner.state.lock().await;
		let state = &mut *guard;
		let count = max_messages.min(state.pending.len());
		let mut batch = Vec::with_capacity(count);

		for mut message in state.pending.drain(..count) {
			let receipt = format!("rh-{}", self.inner.next_receipt.fetch_add(1, Ordering::Relaxed));
			message.receipt_handle = Some(receipt.clone());
			state.in_flight.insert(receipt, message.clone());
			batch.push(message);
		}

		batch
	}
}

#[async_trait::async_trait]
impl QueueClient for InMemQueue {
	async fn send(&self, message: OutboundMessage) -> Result<String> {
		let message_id = format!("msg-{}", self.inner.next_message.fetch_add(1, Ordering::Relaxed));

		self.inner.state.lock().await.pending.push_back(QueueMessage {
			message_id: Some(message_id.clone()),
			receipt_handle: None,
			body: message.body,
			attributes: message.attributes.into_iter().collect(),
		});
		self.inner.arrivals.notify_waiters();

		Ok(message_id)
	}

	async fn receive(&self, request: &ReceiveRequest) -> Result<Vec<QueueMessage>> {
		let max_messages = usize::try_from(request.max_messages.max(1)).map_err(|e| QueueError::Receive(e.to_string()))?;
		let deadline = Instant::now() + request.wait_time;

		loop {
			// Register interest before checking, so a send between the check and the wait is not missed.
			let arrival = self.inner.arrivals.notified();
			tokio::pin!(arrival);
			arrival.as_mut().enable();

			let batch = self.take_batch(max_messages).await;
			if !batch.is_empty() {
				return Ok(batch);
			}

			if timeout_at(deadline, arrival).await.is_err() {
				return Ok(Vec::new());
			}
		}
	}

	async fn delete(&self, receipt_handle: &str) -> Result<()> {
		self.inner
			.state
			.lock()
			.await
			.in_flight
			.remove(receipt_handle)
			.map(|_| ())
			.ok_or_else(|| QueueError::Delete(format!("unknown receipt handle: {receipt_handle}")))
	}

	fn queue_url(&self) -> &str {
		&self.inner.url
	}
}
