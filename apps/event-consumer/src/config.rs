use crate::consumer::ConsumerSettings;
use crate::error::ConsumerError;
use crate::receiver::ReceiverConfig;
use clap::Parser;
use event_queue::SqsConfig;
use std::time::Duration;

/// Largest batch a single long-poll may request.
pub const MAX_MESSAGES_LIMIT: u32 = 10;
/// Longest long-poll wait the queue supports.
pub const MAX_WAIT_TIME_SECONDS: u64 = 20;
/// Largest hand-off capacity, bounding how many received messages are held in memory.
pub const MAX_BUFFER_SIZE: usize = 10_000;
/// Largest number of processing workers.
pub const MAX_WORKERS: usize = 256;

#[derive(Parser, Debug, Clone)]
#[command(name = "event-consumer")]
#[command(about = "Long-polls the event queue and processes received events", long_about = None)]
pub struct Config {
	/// Endpoint override for a local SQS-compatible queue (e.g. ElasticMQ)
	#[arg(long, env = "SQS_ENDPOINT")]
	pub sqs_endpoint: Option<String>,

	/// URL of the queue to consume
	#[arg(long, env = "SQS_QUEUE_URL", default_value = "")]
	pub sqs_queue_url: String,

	/// Region of the queue
	#[arg(long, env = "SQS_REGION", default_value = "")]
	pub sqs_region: String,

	/// Maximum messages per long-poll
	#[arg(long, env = "SQS_MAX_MESSAGES", default_value = "10")]
	pub sqs_max_messages: u32,

	/// Long-poll wait time in seconds
	#[arg(long, env = "SQS_WAIT_TIME_SECONDS", default_value = "20")]
	pub sqs_wait_time_seconds: u64,

	/// Capacity of the in-process hand-off queue
	#[arg(long, env = "CONSUMER_BUFFER_SIZE", default_value = "100")]
	pub consumer_buffer_size: usize,

	/// Delay after a failed receive, in milliseconds
	#[arg(long, env = "RECEIVE_BACKOFF_MS", default_value = "1000")]
	pub receive_backoff_ms: u64,

	/// Number of message processing workers
	#[arg(long, env = "CONSUMER_WORKERS", default_value = "4")]
	pub consumer_workers: usize,

	/// Time allowed for workers to drain on shutdown, in seconds
	#[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value = "10")]
	pub shutdown_timeout_secs: u64,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,
}

impl Config {
	/// Validate configuration values
	pub fn validate(&self) -> Result<(), ConsumerError> {
		if !(1..=MAX_MESSAGES_LIMIT).contains(&self.sqs_max_messages) {
			return Err(ConsumerError::Config(format!("sqs_max_messages must be between 1 and {MAX_MESSAGES_LIMIT}")));
		}

		if self.sqs_wait_time_seconds > MAX_WAIT_TIME_SECONDS {
			return Err(ConsumerError::Config(format!("sqs_wait_time_seconds must be at most {MAX_WAIT_TIME_SECONDS}")));
		}

		if !(1..=MAX_BUFFER_SIZE).contains(&self.consumer_buffer_size) {
			return Err(ConsumerError::Config(format!("consumer_buffer_size must be between 1 and {MAX_BUFFER_SIZE}")));
		}

		if !(1..=MAX_WORKERS).contains(&self.consumer_workers) {
			return Err(ConsumerError::Config(format!("consumer_workers must be between 1 and {MAX_WORKERS}")));
		}

		Ok(())
	}

	pub fn sqs_config(&self) -> SqsConfig {
		SqsConfig {
			endpoint: self.sqs_endpoint.clone(),
			queue_url: self.sqs_queue_url.clone(),
			region: self.sqs_region.clone(),
		}
	}

	pub const fn settings(&self) -> ConsumerSettings {
		ConsumerSettings {
			receiver: ReceiverConfig {
				max_messages: self.sqs_max_messages,
				wait_time: Duration::from_secs(self.sqs_wait_time_seconds),
				backoff: Duration::from_millis(self.receive_backoff_ms),
			},
			buffer_size: self.consumer_buffer_size,
			workers: self.consumer_workers,
			shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
		}
	}
}
