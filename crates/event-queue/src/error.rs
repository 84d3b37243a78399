/// Queue-agnostic error type
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum QueueError {
	/// Required connection settings are missing or invalid
	#[error("Queue configuration error: {0}")]
	Config(String),

	/// The queue rejected or failed to accept a message
	#[error("Failed to send message: {0}")]
	Send(String),

	/// A receive (long-poll) call failed
	#[error("Failed to receive messages: {0}")]
	Receive(String),

	/// Acknowledging a message failed
	#[error("Failed to delete message: {0}")]
	Delete(String),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
