//! Route request and response shapes

use serde::{Deserialize, Serialize};

/// A coordinate pair, e.g. `[latitude, longitude]`.
pub type Point = [f64; 2];

/// Points submitted by a client, in the order the route should visit them.
///
/// Wire format: `{"points": [[lat, lon], ...]}`. Every point must be a
/// two-element numeric array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub points: Vec<Point>,
}

impl RouteRequest {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Decode a request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// The path computed by the routing collaborator.
///
/// Wire format: `{"path": [[lat, lon], ...]}`. Fields other than `path`
/// are dropped when decoding. The path itself is relayed as the
/// collaborator sent it: points of any length are kept, and a missing or
/// `null` path is relayed as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub path: Option<Vec<Vec<f64>>>,
}

impl RouteResponse {
    pub fn new(path: Vec<Vec<f64>>) -> Self {
        Self { path: Some(path) }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
