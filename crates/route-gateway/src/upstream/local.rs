//! HTTP client for the local routing sidecar

use std::time::Duration;

use anyhow::anyhow;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use route_gateway_sdk::JSON_CONTENT_TYPE;

use super::{BoxFuture, Sidecar, SidecarReply, UpstreamError};

/// Sidecar reached with a reqwest client at a fixed address
#[derive(Clone)]
pub struct HttpSidecar {
    inner: reqwest::Client,
    url: Url,
}

impl HttpSidecar {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = url
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", url, e))?;

        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| anyhow!("failed to build sidecar client: {e}"))?;

        Ok(Self { inner, url })
    }
}

impl Sidecar for HttpSidecar {
    fn post_json(&self, body: Vec<u8>) -> BoxFuture<'_, Result<SidecarReply, UpstreamError>> {
        Box::pin(async move {
            // Logged regardless of the debug flag
            tracing::info!(
                url = %self.url,
                content_type = JSON_CONTENT_TYPE,
                body = %String::from_utf8_lossy(&body),
                "Sending POST request to sidecar"
            );

            let response = self
                .inner
                .post(self.url.clone())
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body)
                .send()
                .await
                .map_err(|e| UpstreamError::Transport(error_chain(&e)))?;

            let status = response.status();
            tracing::info!(status = %status, "Received sidecar response");

            let body = response
                .bytes()
                .await
                .map_err(|e| UpstreamError::Transport(error_chain(&e)))?;

            Ok(SidecarReply { status, body })
        })
    }
}

/// reqwest keeps the useful part (connection refused, timed out) in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_post_json_round_trip() {
        let router = Router::new().route(
            "/",
            post(|headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (StatusCode::OK, format!("{content_type}|{body}"))
            }),
        );
        let url = spawn_server(router).await;

        let sidecar = HttpSidecar::new(&url, Duration::from_secs(5)).unwrap();
        let reply = sidecar.post_json(br#"{"points":[[1.0,2.0]]}"#.to_vec()).await.unwrap();

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            &reply.body[..],
            br#"application/json|{"points":[[1.0,2.0]]}"#
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned() {
        let router = Router::new().route(
            "/",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let url = spawn_server(router).await;

        let sidecar = HttpSidecar::new(&url, Duration::from_secs(5)).unwrap();
        let reply = sidecar.post_json(b"{}".to_vec()).await.unwrap();

        assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(&reply.body[..], b"busy");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sidecar = HttpSidecar::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
        let result = sidecar.post_json(b"{}".to_vec()).await;

        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(HttpSidecar::new("not a url", Duration::from_secs(1)).is_err());
        let sidecar = HttpSidecar::new("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(sidecar.url.as_str(), "http://localhost:9000/");
    }
}
