//! Gateway error taxonomy
//!
//! Every failure ends the request. The cause is logged server side and the
//! client only ever sees a short plain-text message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use route_gateway_sdk::EnvelopeError;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors that can occur while relaying a route request
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    EncodeRequest(#[source] serde_json::Error),

    #[error("failed to encode invocation payload: {0}")]
    EncodePayload(#[source] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("sidecar returned status {0}")]
    UpstreamStatus(StatusCode),

    #[error("failed to decode sidecar response: {0}")]
    DecodeResponse(#[source] serde_json::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl GatewayError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamStatus(status) => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Never carries the underlying cause.
    pub fn client_message(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "Invalid request body",
            GatewayError::EncodeRequest(_) => "Failed to marshal request body",
            GatewayError::EncodePayload(_) => "Failed to marshal request payload",
            GatewayError::Upstream(UpstreamError::Transport(_)) => "Failed to send HTTP request",
            GatewayError::Upstream(UpstreamError::Config(_)) => {
                "Failed to load remote function configuration"
            }
            GatewayError::Upstream(UpstreamError::Invocation(_)) => {
                "Failed to invoke remote function"
            }
            GatewayError::UpstreamStatus(_) => "External API request failed",
            GatewayError::DecodeResponse(_) => "Failed to decode API response",
            GatewayError::Envelope(EnvelopeError::Malformed(_)) => {
                "Failed to parse remote function response"
            }
            GatewayError::Envelope(EnvelopeError::MissingBody) => {
                "Invalid body in remote function response"
            }
            GatewayError::Envelope(EnvelopeError::BodyEncoding(_) | EnvelopeError::InnerBody(_)) => {
                "Failed to parse remote function body"
            }
        }
    }

    /// Log the full cause
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_client_error() {
            tracing::warn!(status = %status, error = %self, "Rejected route request");
        } else {
            tracing::error!(status = %status, error = %self, "Route request failed");
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.client_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::InvalidRequest(json_error()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::UpstreamStatus(StatusCode::SERVICE_UNAVAILABLE).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::from(UpstreamError::Config("no region".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::from(EnvelopeError::MissingBody).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_hides_cause() {
        let err = GatewayError::from(UpstreamError::Transport(
            "error sending request: connection refused (10.0.0.7:9000)".into(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Failed to send HTTP request");
    }

    #[test]
    fn test_stages_have_distinct_messages() {
        let messages = [
            GatewayError::InvalidRequest(json_error()).client_message(),
            GatewayError::EncodeRequest(json_error()).client_message(),
            GatewayError::from(UpstreamError::Transport(String::new())).client_message(),
            GatewayError::UpstreamStatus(StatusCode::BAD_GATEWAY).client_message(),
            GatewayError::DecodeResponse(json_error()).client_message(),
            GatewayError::from(UpstreamError::Config(String::new())).client_message(),
            GatewayError::from(UpstreamError::Invocation(String::new())).client_message(),
            GatewayError::from(EnvelopeError::Malformed(json_error())).client_message(),
            GatewayError::from(EnvelopeError::MissingBody).client_message(),
            GatewayError::from(EnvelopeError::InnerBody(json_error())).client_message(),
        ];

        let unique: std::collections::HashSet<_> = messages.iter().collect();
        assert_eq!(unique.len(), messages.len());
    }
}
