//! Outbound collaborators
//!
//! The gateway makes exactly one outbound call per `/route` request, through
//! one of two seams:
//! - [`Sidecar`]: POST a JSON document to a local routing service
//! - [`FunctionInvoker`]: invoke a named remote function with an event payload
//!
//! Handlers only see the trait objects, so tests substitute doubles for the
//! network.

pub mod lambda;
pub mod local;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;
use thiserror::Error;

use crate::config::{AppConfig, GatewayMode};

pub use lambda::LambdaInvoker;
pub use local::HttpSidecar;

/// Boxed future returned by the collaborator traits
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors raised by an outbound client before a usable reply exists
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to load function client configuration: {0}")]
    Config(String),

    #[error("function invocation failed: {0}")]
    Invocation(String),
}

/// Raw reply from the sidecar
#[derive(Debug, Clone)]
pub struct SidecarReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// A local routing service reached over HTTP
pub trait Sidecar: Send + Sync + 'static {
    /// POST `body` as `application/json` and return the status and raw body.
    fn post_json(&self, body: Vec<u8>) -> BoxFuture<'_, Result<SidecarReply, UpstreamError>>;
}

/// A remote function invoked synchronously with a JSON payload
pub trait FunctionInvoker: Send + Sync + 'static {
    /// Invoke `function_name` once and return its raw result payload.
    fn invoke<'a>(
        &'a self,
        function_name: &'a str,
        payload: Vec<u8>,
    ) -> BoxFuture<'a, Result<Vec<u8>, UpstreamError>>;
}

/// The collaborator behind `/route`; exactly one is active per process
#[derive(Clone)]
pub enum Backend {
    Local(Arc<dyn Sidecar>),
    Remote {
        invoker: Arc<dyn FunctionInvoker>,
        function_name: String,
    },
}

impl Backend {
    /// Build the real collaborator for the configured mode
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match config.mode {
            GatewayMode::Local => {
                let sidecar = HttpSidecar::new(
                    &config.sidecar_url,
                    Duration::from_secs(config.sidecar_timeout_secs),
                )?;
                Ok(Self::Local(Arc::new(sidecar)))
            }
            GatewayMode::Remote => Ok(Self::Remote {
                invoker: Arc::new(LambdaInvoker::new()),
                function_name: config.function_name.clone(),
            }),
        }
    }

    pub fn mode(&self) -> GatewayMode {
        match self {
            Self::Local(_) => GatewayMode::Local,
            Self::Remote { .. } => GatewayMode::Remote,
        }
    }
}
