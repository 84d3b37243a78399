use crate::EnvelopeError;
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Free-form JSON attached to an event by its publisher.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A single analytics event as submitted by a publisher.
///
/// Field-level bounds are declared here; the temporal check (no future timestamps) needs the
/// server clock and lives with the ingestion validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Event {
	#[garde(length(min = 1, max = 256))]
	pub event_name: String,

	#[garde(length(min = 1, max = 128))]
	pub channel: String,

	#[serde(default)]
	#[garde(length(min = 1, max = 256))]
	pub campaign_id: Option<String>,

	#[serde(default)]
	#[garde(length(min = 1, max = 256))]
	pub user_id: Option<String>,

	/// Seconds since the unix epoch at which the event occurred.
	#[garde(skip)]
	pub timestamp: i64,

	#[serde(default)]
	#[garde(length(max = 64), inner(length(min = 1, max = 128)))]
	pub tags: Vec<String>,

	#[serde(default)]
	#[garde(skip)]
	pub metadata: Metadata,
}

impl Event {
	pub fn new(event_name: impl Into<String>, channel: impl Into<String>, timestamp: i64) -> Self {
		Self {
			event_name: event_name.into(),
			channel: channel.into(),
			campaign_id: None,
			user_id: None,
			timestamp,
			tags: Vec::new(),
			metadata: Metadata::new(),
		}
	}

	#[must_use]
	pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
		self.campaign_id = Some(campaign_id.into());
		self
	}

	#[must_use]
	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	#[must_use]
	pub fn with_tags<I, T>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();
		self
	}

	#[must_use]
	pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.metadata.insert(key.into(), value);
		self
	}

	/// Size in bytes of this event's JSON encoding.
	pub fn encoded_len(&self) -> Result<usize, EnvelopeError> {
		Ok(serde_json::to_vec(self)?.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_optional_fields_default_when_absent() {
		let event: Event = serde_json::from_value(json!({
			"event_name": "click",
			"channel": "web",
			"timestamp": 1_700_000_000
		}))
		.unwrap();

		assert_eq!(event, Event::new("click", "web", 1_700_000_000));
	}

	#[test]
	fn test_field_rules() {
		assert!(Event::new("click", "web", 0).validate().is_ok());
		assert!(Event::new("", "web", 0).validate().is_err());
		assert!(Event::new("click", "", 0).validate().is_err());
		assert!(Event::new("click", "web", 0).with_user_id("").validate().is_err());
		assert!(Event::new("click", "web", 0).with_tags(["ok", ""]).validate().is_err());

		let too_many_tags = (0..65).map(|i| format!("tag-{i}"));
		assert!(Event::new("click", "web", 0).with_tags(too_many_tags).validate().is_err());
	}

	#[test]
	fn test_encoded_len_tracks_metadata() {
		let small = Event::new("click", "web", 0);
		let large = small.clone().with_metadata("blob", json!("x".repeat(1024)));

		assert_eq!(small.encoded_len().unwrap(), serde_json::to_string(&small).unwrap().len());
		assert!(large.encoded_len().unwrap() > small.encoded_len().unwrap() + 1024);
	}
}
