#![cfg(feature = "sqs")]

use super::config::SqsConfig;
use crate::error::{QueueError, Result};
use crate::message::{OutboundMessage, QueueMessage, ReceiveRequest};
use crate::traits::QueueClient;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::config::Credentials;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{Message, MessageAttributeValue};
use aws_sdk_sqs::Client;
use std::collections::HashMap;

const STRING_DATA_TYPE: &str = "String";

/// SQS-backed queue client.
///
/// Cloning is cheap; the underlying SDK client is reference counted.
#[derive(Clone, Debug)]
pub struct SqsQueue {
	client: Client,
	queue_url: String,
}

impl SqsQueue {
	/// Wraps an already configured SDK client.
	pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
		Self {
			client,
			queue_url: queue_url.into(),
		}
	}

	/// Builds an SDK client from `config`.
	///
	/// With an endpoint override the client targets that endpoint with static dummy
	/// credentials; otherwise the default credential chain is used.
	pub async fn connect(config: &SqsConfig) -> Result<Self> {
		config.validate()?;

		let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

		if let Some(endpoint) = &config.endpoint {
			tracing::info!(endpoint = %endpoint, "Using SQS endpoint override");
			loader = loader
				.endpoint_url(endpoint.clone())
				.credentials_provider(Credentials::new("dummy", "dummy", None, None, "static"));
		}

		let sdk_config = loader.load().await;

		Ok(Self::new(Client::new(&sdk_config), config.queue_url.clone()))
	}

	fn attribute_values(message: &OutboundMessage) -> Result<HashMap<String, MessageAttributeValue>> {
		message
			.attributes
			.iter()
			.map(|(name, value)| {
				MessageAttributeValue::builder()
					.data_type(STRING_DATA_TYPE)
					.string_value(value)
					.build()
					.map(|attr| (name.clone(), attr))
					.map_err(|e| QueueError::Send(e.to_string()))
			})
			.collect()
	}
}

fn into_queue_message(message: &Message) -> QueueMessage {
	let attributes = message
		.message_attributes()
		.map(|attrs| {
			attrs
				.iter()
				.filter_map(|(name, value)| value.string_value().map(|v| (name.clone(), v.to_string())))
				.collect()
		})
		.unwrap_or_default();

	QueueMessage {
		message_id: message.message_id().map(str::to_string),
		receipt_handle: message.receipt_handle().map(str::to_string),
		body: message.body().unwrap_or_default().to_string(),
		attributes,
	}
}

#[async_trait::async_trait]
impl QueueClient for SqsQueue {
	async fn send(&self, message: OutboundMessage) -> Result<String> {
		let attributes = Self::attribute_values(&message)?;

		let output = self
			.client
			.send_message()
			.queue_url(&self.queue_url)
			.message_body(message.body)
			.set_message_attributes(Some(attributes))
			.send()
			.await
			.map_err(|e| QueueError::Send(DisplayErrorContext(&e).to_string()))?;

		Ok(output.message_id().unwrap_or_default().to_string())
	}

	async fn receive(&self, request: &ReceiveRequest) -> Result<Vec<QueueMessage>> {
		let max_messages = i32::try_from(request.max_messages).map_err(|e| QueueError::Receive(e.to_string()))?;
		let wait_seconds = i32::try_from(request.wait_time.as_secs()).map_err(|e| QueueError::Receive(e.to_string()))?;

		let output = self
			.client
			.receive_message()
			.queue_url(&self.queue_url)
			.max_number_of_messages(max_messages)
			.wait_time_seconds(wait_seconds)
			.set_message_attribute_names(Some(request.attribute_names.clone()))
			.send()
			.await
			.map_err(|e| QueueError::Receive(DisplayErrorContext(&e).to_string()))?;

		Ok(output.messages().iter().map(into_queue_message).collect())
	}

	async fn delete(&self, receipt_handle: &str) -> Result<()> {
		self.client
			.delete_message()
			.queue_url(&self.queue_url)
			.receipt_handle(receipt_handle)
			.send()
			.await
			.map_err(|e| QueueError::Delete(DisplayErrorContext(&e).to_string()))?;

		Ok(())
	}

	fn queue_url(&self) -> &str {
		&self.queue_url
	}
}
