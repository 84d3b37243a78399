use clap::Parser;
use event_queue::SqsConfig;

/// Largest accepted request body limit, in megabytes.
pub const MAX_REQUEST_SIZE_MB: usize = 256;
/// Largest accepted bulk submission size.
pub const MAX_BULK_EVENTS_LIMIT: usize = 10_000;

#[derive(Parser, Debug, Clone)]
#[command(name = "event-api")]
#[command(about = "Analytics event ingestion API", long_about = None)]
pub struct Config {
	/// Deployment environment name
	#[arg(long, env = "SERVICE_ENVIRONMENT", default_value = "development")]
	pub environment: String,

	/// Interface the HTTP server binds to
	#[arg(long, env = "SERVICE_API_HOST", default_value = "0.0.0.0")]
	pub host: String,

	/// Port the HTTP server listens on
	#[arg(long, env = "SERVICE_API_PORT", default_value = "8080")]
	pub port: u16,

	/// Endpoint override for a local SQS-compatible queue (e.g. ElasticMQ)
	#[arg(long, env = "SQS_ENDPOINT")]
	pub sqs_endpoint: Option<String>,

	/// URL of the queue events are published to
	#[arg(long, env = "SQS_QUEUE_URL", default_value = "")]
	pub sqs_queue_url: String,

	/// Region of the queue
	#[arg(long, env = "SQS_REGION", default_value = "")]
	pub sqs_region: String,

	/// Maximum request body size in megabytes
	#[arg(long, env = "MAX_REQUEST_SIZE_MB", default_value = "2")]
	pub max_request_size_mb: usize,

	/// Maximum number of events accepted in one bulk submission
	#[arg(long, env = "MAX_BULK_EVENTS", default_value = "1000")]
	pub max_bulk_events: usize,

	/// Per-request timeout in milliseconds
	#[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
	pub request_timeout_ms: u64,

	/// Maximum number of requests served concurrently
	#[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value = "512")]
	pub max_concurrent_requests: usize,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,
}

impl Config {
	/// Validate configuration values
	pub fn validate(&self) -> Result<(), String> {
		if !(1..=MAX_REQUEST_SIZE_MB).contains(&self.max_request_size_mb) {
			return Err(format!("max_request_size_mb must be between 1 and {MAX_REQUEST_SIZE_MB}"));
		}

		if !(1..=MAX_BULK_EVENTS_LIMIT).contains(&self.max_bulk_events) {
			return Err(format!("max_bulk_events must be between 1 and {MAX_BULK_EVENTS_LIMIT}"));
		}

		if self.request_timeout_ms == 0 {
			return Err("request_timeout_ms must be greater than 0".to_string());
		}

		if self.max_concurrent_requests == 0 {
			return Err("max_concurrent_requests must be greater than 0".to_string());
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

	pub const fn max_request_size_bytes(&self) -> usize {
		self.max_request_size_mb.saturating_mul(1024 * 1024)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Config {
		Config::try_parse_from(std::iter::once("event-api").chain(args.iter().copied())).unwrap()
	}

	#[test]
	fn test_defaults() {
		let config = parse(&["--sqs-queue-url", "http://localhost:9324/queue/events", "--sqs-region", "us-east-1"]);

		assert_eq!(config.max_bulk_events, 1000);
		assert_eq!(config.max_request_size_bytes(), 2 * 1024 * 1024);
		assert!(config.validate().is_ok());
		assert!(config.sqs_config().validate().is_ok());
	}

	#[test]
	fn test_rejects_zero_limits() {
		let config = parse(&["--max-bulk-events", "0"]);
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_rejects_limits_above_bounds() {
		for args in [
			&["--max-request-size-mb", "257"],
			&["--max-request-size-mb", "18446744073709551615"],
			&["--max-bulk-events", "10001"],
		] {
			assert!(parse(args).validate().is_err(), "{args:?}");
		}
	}

	#[test]
	fn test_request_size_bytes_saturates() {
		let config = parse(&["--max-request-size-mb", "18446744073709551615"]);
		assert_eq!(config.max_request_size_bytes(), usize::MAX);
	}
}
