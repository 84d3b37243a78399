//! Queue consumer for analytics events.
//!
//! A single receive loop long-polls the queue and pushes messages into a bounded hand-off
//! queue; a pool of workers drains it, handles each message and acknowledges it.

pub mod config;
pub mod consumer;
pub mod error;
pub mod handoff;
pub mod processor;
pub mod receiver;

pub use config::Config;
pub use consumer::{Consumer, ConsumerSettings};
pub use error::ConsumerError;
pub use processor::{EnvelopeLogger, MessageHandler};
pub use receiver::{QueueReceiver, ReceiverConfig, ReceiverState};

use event_queue::SqsQueue;

/// Connects to the queue described by `config`.
pub async fn connect_queue(config: &Config) -> Result<SqsQueue, ConsumerError> {
	Ok(SqsQueue::connect(&config.sqs_config()).await?)
}
