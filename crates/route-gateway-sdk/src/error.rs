//! Error types for decoding remote function results

use thiserror::Error;

/// Errors that can occur while unwrapping a remote function's result envelope.
///
/// Each variant is a distinct stage of the unwrap so callers can report
/// them separately.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("result envelope is not a JSON object: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("result envelope has no string body")]
    MissingBody,

    #[error("result body is not valid base64: {0}")]
    BodyEncoding(#[from] base64::DecodeError),

    #[error("result body is not a route response: {0}")]
    InnerBody(#[source] serde_json::Error),
}
