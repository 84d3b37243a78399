use crate::publisher::PublishError;
use crate::service::IngestError;
use crate::validation::ValidationError;
use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tower::BoxError;
use tracing::Level;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("{0}")]
	Validation(#[from] ValidationError),

	#[error("{0}")]
	Publish(#[from] PublishError),

	#[error("{0}")]
	BadRequest(String),

	#[error("Request timeout")]
	RequestTimeout,

	#[error("Service temporarily overloaded")]
	ServiceOverloaded,

	#[error("Unexpected Tower Service error: {0}")]
	TowerError(BoxError),
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: &'static str,
	pub message: String,
}

impl From<IngestError> for ApiError {
	fn from(err: IngestError) -> Self {
		match err {
			IngestError::Validation(e) => Self::Validation(e),
			IngestError::Publish(e) => Self::Publish(e),
		}
	}
}

impl ApiError {
	const fn status_code(&self) -> StatusCode {
		match self {
			Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
			Self::Publish(_) | Self::TowerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
			Self::ServiceOverloaded => StatusCode::SERVICE_UNAVAILABLE,
		}
	}

	const fn kind(&self) -> &'static str {
		match self {
			Self::Validation(_) => "validation_error",
			Self::Publish(_) => "publish_error",
			Self::BadRequest(_) => "bad_request",
			Self::RequestTimeout => "request_timeout",
			Self::ServiceOverloaded => "service_overloaded",
			Self::TowerError(_) => "internal_error",
		}
	}

	/// Level this error is logged at when turned into a response, if it is logged at all.
	///
	/// Timeouts and overload are already logged where the tower error is mapped.
	const fn log_level(&self) -> Option<Level> {
		match self {
			Self::Validation(_) => Some(Level::WARN),
			Self::Publish(_) | Self::TowerError(_) => Some(Level::ERROR),
			Self::BadRequest(_) | Self::RequestTimeout | Self::ServiceOverloaded => None,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response<Body> {
		if let Some(level) = self.log_level() {
			if level == Level::ERROR {
				tracing::error!(kind = self.kind(), error = %self, "❌ Request failed");
			} else {
				tracing::warn!(kind = self.kind(), error = %self, "⚠️ Event rejected");
			}
		}

		let body = ErrorResponse {
			error: self.kind(),
			message: self.to_string(),
		};

		(self.status_code(), Json(body)).into_response()
	}
}

pub async fn handle_tower_error(error: BoxError) -> ApiError {
	if error.is::<tower::timeout::error::Elapsed>() {
		tracing::warn!("Request timeout: {}", error);
		ApiError::RequestTimeout
	} else if error.is::<tower::load_shed::error::Overloaded>() {
		tracing::warn!("Service overloaded: {}", error);
		ApiError::ServiceOverloaded
	} else {
		ApiError::TowerError(error)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use event_queue::QueueError;

	#[test]
	fn test_status_codes() {
		let validation = ApiError::from(ValidationError::FutureTimestamp { timestamp: 10, now: 1 });
		let publish = ApiError::from(PublishError::Queue(QueueError::Send("down".to_string())));

		assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(validation.kind(), "validation_error");
		assert_eq!(publish.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(publish.kind(), "publish_error");
	}

	#[test]
	fn test_each_failure_is_logged_once_at_its_level() {
		let validation = ApiError::from(IngestError::Validation(ValidationError::FutureTimestamp { timestamp: 10, now: 1 }));
		let publish = ApiError::from(IngestError::Publish(PublishError::Queue(QueueError::Send("down".to_string()))));

		assert_eq!(validation.log_level(), Some(Level::WARN));
		assert_eq!(publish.log_level(), Some(Level::ERROR));
		assert_eq!(ApiError::TowerError("boom".into()).log_level(), Some(Level::ERROR));
		assert_eq!(ApiError::BadRequest("empty".to_string()).log_level(), None);
		assert_eq!(ApiError::RequestTimeout.log_level(), None);
		assert_eq!(ApiError::ServiceOverloaded.log_level(), None);
	}

	#[tokio::test]
	async fn test_tower_errors_map_to_timeout_and_overload() {
		let timeout = handle_tower_error(Box::new(tower::timeout::error::Elapsed::new())).await;
		let overloaded = handle_tower_error(Box::new(tower::load_shed::error::Overloaded::new())).await;

		assert_eq!(timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
		assert_eq!(overloaded.status_code(), StatusCode::SERVICE_UNAVAILABLE);
	}
}
