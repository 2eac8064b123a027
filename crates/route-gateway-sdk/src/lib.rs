//! Route Gateway SDK - Shared data shapes for the route gateway
//!
//! This crate holds the types that travel across the gateway's boundaries:
//! the client-facing route request/response pair, and the HTTP-event
//! envelope used to invoke a remote routing function. A routing function
//! written in Rust can depend on this crate to speak the same contract.

pub mod envelope;
pub mod error;
pub mod route;

pub mod prelude {
    //! Common imports for code speaking the gateway contract
    pub use crate::envelope::{EventResult, HttpEvent};
    pub use crate::error::EnvelopeError;
    pub use crate::route::{Point, RouteRequest, RouteResponse};
}

// Re-export key types at crate root
pub use envelope::{EventResult, HttpEvent, JSON_CONTENT_TYPE};
pub use error::EnvelopeError;
pub use route::{Point, RouteRequest, RouteResponse};
