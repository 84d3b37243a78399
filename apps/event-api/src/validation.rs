use analytics_events::{EnvelopeError, Event, MAX_EVENT_BYTES, MAX_METADATA_KEYS};

/// Seconds an event timestamp may run ahead of the server clock.
pub const CLOCK_SKEW_TOLERANCE_SECS: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
	#[error("timestamp cannot be in the future: {timestamp} > {now}")]
	FutureTimestamp { timestamp: i64, now: i64 },

	#[error("invalid event: {0}")]
	InvalidEvent(#[from] garde::Report),

	#[error("too many metadata keys: {count} > {max}")]
	TooManyMetadataKeys { count: usize, max: usize },

	#[error("event too large: {size} bytes > {max}")]
	PayloadTooLarge { size: usize, max: usize },

	#[error(transparent)]
	Encoding(#[from] EnvelopeError),
}

/// Checks a single event against the server time `now` (seconds since epoch).
///
/// The timestamp rule is checked first, so a future event is always reported as such
/// regardless of its other fields.
pub fn validate(event: &Event, now: i64) -> Result<(), ValidationError> {
	if event.timestamp > now.saturating_add(CLOCK_SKEW_TOLERANCE_SECS) {
		return Err(ValidationError::FutureTimestamp { timestamp: event.timestamp, now });
	}

	garde::Validate::validate(event)?;

	if event.metadata.len() > MAX_METADATA_KEYS {
		return Err(ValidationError::TooManyMetadataKeys {
			count: event.metadata.len(),
			max: MAX_METADATA_KEYS,
		});
	}

	let size = event.encoded_len()?;
	if size > MAX_EVENT_BYTES {
		return Err(ValidationError::PayloadTooLarge { size, max: MAX_EVENT_BYTES });
	}

	Ok(())
}
