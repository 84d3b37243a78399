//! Shared analytics event model.
//!
//! `Event` is what publishers submit; `EventEnvelope` is the JSON body that travels through the
//! durable queue once an event has been accepted and given an id. Both the ingestion API and the
//! queue consumer depend on this crate so the wire shape is defined in exactly one place.

mod envelope;
mod event;

pub use envelope::{EnvelopeError, EventEnvelope};
pub use event::{Event, Metadata};

/// Message attribute carrying the event name, set on every published message.
pub const EVENT_NAME_ATTRIBUTE: &str = "EventName";

/// Message attribute carrying the publisher channel, set on every published message.
pub const CHANNEL_ATTRIBUTE: &str = "Channel";

/// Upper bound on the number of metadata keys a single event may carry.
pub const MAX_METADATA_KEYS: usize = 64;

/// Upper bound on the encoded size of a single event.
///
/// SQS caps a message at 256 KiB including attributes; the remaining KiB covers the event id
/// and the two routing attributes added when the event is enqueued.
pub const MAX_EVENT_BYTES: usize = 255 * 1024;
