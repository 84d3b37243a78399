//! Durable Queue Transport Crate
//!
//! Provides a transport-agnostic abstraction over an at-least-once message queue:
//! enqueue a message, long-poll for a batch, acknowledge by deleting.
//!
//! # Features
//!
//! - `inmem` - Enable the in-process queue (tests, local runs)
//! - `sqs` - Enable the AWS SQS backend (also works against ElasticMQ)
//!
//! # Architecture
//!
//! Every backend implements the [`QueueClient`] trait, so publishers and receivers hold an
//! `Arc<dyn QueueClient>` and never know which queue sits behind it.
//!
//! # Example
//!
//! ```rust,no_run
//! use event_queue::{OutboundMessage, QueueClient, ReceiveRequest};
//! use std::time::Duration;
//!
//! #[cfg(feature = "inmem")]
//! async fn example_inmem() {
//!     use event_queue::InMemQueue;
//!
//!     let queue = InMemQueue::new("inmem://events");
//!
//!     queue.send(OutboundMessage::new("{}").with_attribute("EventName", "click")).await.ok();
//!
//!     let batch = queue.receive(&ReceiveRequest::new(10, Duration::from_secs(1))).await.unwrap();
//!     for message in batch {
//!         println!("Received: {}", message.body);
//!     }
//! }
//! ```

// Core modules (always available)
pub mod error;
pub mod message;
pub mod traits;

// Re-export core types
pub use error::{QueueError, Result};
pub use message::{OutboundMessage, QueueMessage, ReceiveRequest, ALL_ATTRIBUTES};
pub use traits::QueueClient;

// Feature-gated queue implementations
#[cfg(feature = "inmem")]
pub mod inmem;

#[cfg(feature = "sqs")]
pub mod sqs;

#[cfg(feature = "inmem")]
pub use inmem::InMemQueue;

#[cfg(feature = "sqs")]
pub use sqs::{SqsConfig, SqsQueue};
