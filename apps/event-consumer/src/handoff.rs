//! Bounded single-producer, multi-consumer hand-off queue.
//!
//! The producer side blocks when the queue is full, which is how backpressure reaches the
//! receive loop. Closing is explicit and idempotent; consumers see end-of-stream only once the
//! queue is closed and every buffered item has been taken.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum HandoffError<T> {
	/// The producer already closed the queue
	#[error("hand-off queue is closed")]
	Closed(T),

	/// Every consumer has gone away
	#[error("hand-off queue has no consumers")]
	Disconnected(T),
}

impl<T> HandoffError<T> {
	/// Returns the item that could not be handed off.
	pub fn into_inner(self) -> T {
		match self {
			Self::Closed(item) | Self::Disconnected(item) => item,
		}
	}
}

/// Creates a hand-off queue holding at most `capacity` items (minimum 1).
pub fn channel<T>(capacity: usize) -> (HandoffSender<T>, HandoffReceiver<T>) {
	let (tx, rx) = mpsc::channel(capacity.max(1));

	(HandoffSender { tx: Some(tx) }, HandoffReceiver { rx: Arc::new(Mutex::new(rx)) })
}

/// Producer side. Deliberately not `Clone`: there is exactly one producer.
#[derive(Debug)]
pub struct HandoffSender<T> {
	tx: Option<mpsc::Sender<T>>,
}

impl<T> HandoffSender<T> {
	/// Pushes an item, waiting while the queue is full.
	pub async fn send(&self, item: T) -> Result<(), HandoffError<T>> {
		match &self.tx {
			Some(tx) => tx.send(item).await.map_err(|e| HandoffError::Disconnected(e.0)),
			None => Err(HandoffError::Closed(item)),
		}
	}

	/// Closes the queue. Calling it again has no effect.
	pub fn close(&mut self) {
		self.tx = None;
	}

	pub const fn is_closed(&self) -> bool {
		self.tx.is_none()
	}
}

/// Consumer side. Clones share the same queue; each item goes to exactly one of them.
#[derive(Debug)]
pub struct HandoffReceiver<T> {
	rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for HandoffReceiver<T> {
	fn clone(&self) -> Self {
		Self { rx: Arc::clone(&self.rx) }
	}
}

impl<T> HandoffReceiver<T> {
	/// Waits for the next item. Returns `None` only after the queue is closed and drained.
	pub async fn recv(&self) -> Option<T> {
		self.rx.lock().await.recv().await
	}
}
