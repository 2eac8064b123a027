//! `/route` handlers
//!
//! Both handlers are a single linear pipeline: decode the client body,
//! re-encode it for the collaborator, make one outbound call, decode the
//! reply and relay it. Any stage failing ends the request with a
//! [`GatewayError`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use route_gateway_sdk::{EventResult, HttpEvent, RouteRequest, RouteResponse};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::upstream::{FunctionInvoker, Sidecar};

pub type Result<T> = std::result::Result<T, GatewayError>;

/// State for the local (sidecar) route handler
pub struct LocalState {
    pub sidecar: Arc<dyn Sidecar>,
}

/// State for the remote (function) route handler
pub struct RemoteState {
    pub invoker: Arc<dyn FunctionInvoker>,
    pub function_name: String,
}

/// Relay a route request to the local sidecar
pub async fn route_local(
    State(state): State<Arc<LocalState>>,
    body: Bytes,
) -> Result<Json<RouteResponse>> {
    let span = tracing::info_span!("route", request_id = %Uuid::new_v4(), mode = "local");

    forward_to_sidecar(&state, &body)
        .instrument(span)
        .await
        .inspect_err(GatewayError::log)
        .map(Json)
}

/// Relay a route request to the remote function
pub async fn route_remote(
    State(state): State<Arc<RemoteState>>,
    body: Bytes,
) -> Result<Json<RouteResponse>> {
    let span = tracing::info_span!(
        "route",
        request_id = %Uuid::new_v4(),
        mode = "remote",
        function = %state.function_name
    );

    invoke_function(&state, &body)
        .instrument(span)
        .await
        .inspect_err(GatewayError::log)
        .map(Json)
}

async fn forward_to_sidecar(state: &LocalState, body: &[u8]) -> Result<RouteResponse> {
    let request = RouteRequest::from_slice(body).map_err(GatewayError::InvalidRequest)?;
    tracing::info!(points = request.points.len(), "Forwarding route request");

    let payload = request.to_vec().map_err(GatewayError::EncodeRequest)?;

    let reply = state.sidecar.post_json(payload).await?;
    if reply.status != StatusCode::OK {
        return Err(GatewayError::UpstreamStatus(reply.status));
    }

    RouteResponse::from_slice(&reply.body).map_err(GatewayError::DecodeResponse)
}

async fn invoke_function(state: &RemoteState, body: &[u8]) -> Result<RouteResponse> {
    let request = RouteRequest::from_slice(body).map_err(GatewayError::InvalidRequest)?;

    let payload = HttpEvent::post_json(&request)
        .and_then(|event| event.to_vec())
        .map_err(GatewayError::EncodePayload)?;
    tracing::debug!(payload = %String::from_utf8_lossy(&payload), "Invoking remote function");

    let result = state
        .invoker
        .invoke(&state.function_name, payload)
        .await?;

    let envelope = EventResult::from_slice(&result)?;
    if let Some(status) = envelope.status_code() {
        tracing::debug!(status, "Remote function returned");
    }

    Ok(envelope.decode_body()?)
}
