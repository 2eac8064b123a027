//! HTTP-event envelopes for invoking a remote routing function
//!
//! The remote function speaks a generic HTTP-event contract: the request is
//! wrapped in an event carrying method, headers and a string-encoded body,
//! and the result comes back as another envelope whose `body` member is
//! itself a JSON document encoded as a string.
//!
//! ```text
//! -> {"httpMethod": "POST", "headers": {...}, "body": "{\"points\":...}", "isBase64Encoded": false}
//! <- {"statusCode": 200, "body": "{\"path\":...}"}
//! ```

use std::collections::HashMap;

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EnvelopeError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The invocation payload sent to a remote function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    pub http_method: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// The request document, JSON-encoded into a string
    pub body: String,

    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpEvent {
    /// Wrap `payload` as the JSON body of a POST event.
    pub fn post_json<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());

        Ok(Self {
            http_method: "POST".to_string(),
            headers,
            body: serde_json::to_string(payload)?,
            is_base64_encoded: false,
        })
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A remote function's result envelope.
///
/// Only `body` is required. It is kept as a loose JSON object so that a
/// missing or wrong-typed body can be told apart from a payload that is
/// not an object at all.
#[derive(Debug, Clone)]
pub struct EventResult {
    fields: Map<String, Value>,
}

impl EventResult {
    /// Parse a raw result payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, EnvelopeError> {
        let fields = serde_json::from_slice(payload).map_err(EnvelopeError::Malformed)?;
        Ok(Self { fields })
    }

    pub fn status_code(&self) -> Option<u64> {
        self.fields.get("statusCode").and_then(Value::as_u64)
    }

    pub fn is_base64_encoded(&self) -> bool {
        self.fields
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The raw `body` string, if present and a string.
    pub fn body(&self) -> Option<&str> {
        self.fields.get("body").and_then(Value::as_str)
    }

    /// Decode the string body as a JSON document of type `T`.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        let body = self.body().ok_or(EnvelopeError::MissingBody)?;

        if self.is_base64_encoded() {
            let raw = base64::engine::general_purpose::STANDARD.decode(body)?;
            serde_json::from_slice(&raw).map_err(EnvelopeError::InnerBody)
        } else {
            serde_json::from_str(body).map_err(EnvelopeError::InnerBody)
        }
    }
}
