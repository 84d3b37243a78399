use crate::{Event, CHANNEL_ATTRIBUTE, EVENT_NAME_ATTRIBUTE};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("invalid event envelope: {0}")]
pub struct EnvelopeError(#[from] serde_json::Error);

/// An accepted event together with its assigned id, as carried in a queue message body.
///
/// Serializes to a flat JSON object:
/// `{event_id, event_name, channel, campaign_id, user_id, timestamp, tags, metadata}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
	pub event_id: String,
	#[serde(flatten)]
	pub event: Event,
}

impl EventEnvelope {
	pub fn new(event_id: impl Into<String>, event: Event) -> Self {
		Self { event_id: event_id.into(), event }
	}

	pub fn to_json(&self) -> Result<String, EnvelopeError> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn from_json(body: &str) -> Result<Self, EnvelopeError> {
		Ok(serde_json::from_str(body)?)
	}

	/// Out-of-band attributes that let consumers filter without decoding the body.
	pub fn attributes(&self) -> [(&'static str, &str); 2] {
		[(EVENT_NAME_ATTRIBUTE, self.event.event_name.as_str()), (CHANNEL_ATTRIBUTE, self.event.channel.as_str())]
	}
}
