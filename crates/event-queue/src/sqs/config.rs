#![cfg(feature = "sqs")]

use crate::error::{QueueError, Result};

/// Connection settings for an SQS-compatible queue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqsConfig {
	/// Endpoint override for local SQS-compatible servers. When set, static dummy
	/// credentials are used instead of the default credential chain.
	pub endpoint: Option<String>,
	pub queue_url: String,
	pub region: String,
}

impl SqsConfig {
	pub fn new(queue_url: impl Into<String>, region: impl Into<String>) -> Self {
		Self {
			endpoint: None,
			queue_url: queue_url.into(),
			region: region.into(),
		}
	}

	#[must_use]
	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = Some(endpoint.into());
		self
	}

	/// Checks that the required settings are present.
	pub fn validate(&self) -> Result<()> {
		if self.queue_url.trim().is_empty() {
			return Err(QueueError::Config("queue URL is required".to_string()));
		}
		if self.region.trim().is_empty() {
			return Err(QueueError::Config("region is required".to_string()));
		}
		if self.endpoint.as_deref().is_some_and(|e| e.trim().is_empty()) {
			return Err(QueueError::Config("endpoint override must not be blank".to_string()));
		}
		Ok(())
	}
}
