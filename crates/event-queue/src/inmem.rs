//! In-process queue implementation
//!
//! Behaves like a long-polling queue without a network: `receive` parks until a message
//! arrives or the wait time elapses, and delivered messages stay in flight until deleted.
//!
//! # Example
//!
//! ```rust,no_run
//! use event_queue::inmem::InMemQueue;
//! use event_queue::{OutboundMessage, QueueClient, ReceiveRequest};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let queue = InMemQueue::new("inmem://events");
//!
//!     queue.send(OutboundMessage::new("hello")).await.ok();
//!
//!     let batch = queue.receive(&ReceiveRequest::new(10, Duration::from_secs(5))).await.unwrap();
//!     for message in &batch {
//!         queue.delete(message.receipt_handle.as_deref().unwrap_or_default()).await.ok();
//!     }
//! }
//! ```

#![cfg(feature = "inmem")]

mod queue;

pub use queue::InMemQueue;
