use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Attribute-name selector asking the queue to return every message attribute.
pub const ALL_ATTRIBUTES: &str = "All";

/// A message about to be enqueued: a text body plus string attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
	pub body: String,
	pub attributes: BTreeMap<String, String>,
}

impl OutboundMessage {
	pub fn new(body: impl Into<String>) -> Self {
		Self {
			body: body.into(),
			attributes: BTreeMap::new(),
		}
	}

	#[must_use]
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}
}

/// A message handed back by a receive call.
///
/// `receipt_handle` identifies this particular delivery and is what acknowledgement needs;
/// the same message delivered twice gets two different handles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueMessage {
	pub message_id: Option<String>,
	pub receipt_handle: Option<String>,
	pub body: String,
	pub attributes: HashMap<String, String>,
}

impl QueueMessage {
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}
}

/// Parameters for a single long-poll receive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveRequest {
	/// Upper bound on messages returned by one call
	pub max_messages: u32,
	/// How long the queue may hold the call open waiting for messages
	pub wait_time: Duration,
	pub attribute_names: Vec<String>,
}

impl ReceiveRequest {
	/// Builds a request that asks for all message attributes.
	pub fn new(max_messages: u32, wait_time: Duration) -> Self {
		Self {
			max_messages,
			wait_time,
			attribute_names: vec![ALL_ATTRIBUTES.to_string()],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_receive_request_asks_for_all_attributes() {
		let request = ReceiveRequest::new(10, Duration::from_secs(20));
		assert_eq!(request.attribute_names, vec!["All".to_string()]);
	}

	#[test]
	fn test_attribute_lookup() {
		let message = QueueMessage {
			attributes: HashMap::from([("EventName".to_string(), "click".to_string())]),
			..QueueMessage::default()
		};

		assert_eq!(message.attribute("EventName"), Some("click"));
		assert_eq!(message.attribute("Channel"), None);
	}
}
