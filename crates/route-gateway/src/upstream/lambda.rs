//! AWS Lambda function invoker
//!
//! Credentials and region come from the standard AWS provider chain. The
//! Lambda client is built on first use and kept for the life of the process;
//! a failed configuration load is not cached, so the next request tries again.
//! SDK retries are disabled: every request makes a single invocation attempt.

use aws_config::BehaviorVersion;
use aws_sdk_lambda::config::retry::RetryConfig;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use tokio::sync::OnceCell;

use super::{BoxFuture, FunctionInvoker, UpstreamError};

/// Invokes Lambda functions synchronously (request/response invocation type)
#[derive(Default)]
pub struct LambdaInvoker {
    client: OnceCell<aws_sdk_lambda::Client>,
}

impl LambdaInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self) -> Result<&aws_sdk_lambda::Client, UpstreamError> {
        self.client
            .get_or_try_init(|| async {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .retry_config(RetryConfig::disabled())
                    .load()
                    .await;
                if sdk_config.region().is_none() {
                    return Err(UpstreamError::Config(
                        "no AWS region configured".to_string(),
                    ));
                }
                tracing::debug!(region = ?sdk_config.region(), "Loaded AWS configuration");
                Ok(aws_sdk_lambda::Client::new(&sdk_config))
            })
            .await
    }
}

impl FunctionInvoker for LambdaInvoker {
    fn invoke<'a>(
        &'a self,
        function_name: &'a str,
        payload: Vec<u8>,
    ) -> BoxFuture<'a, Result<Vec<u8>, UpstreamError>> {
        Box::pin(async move {
            let client = self.client().await?;

            let output = client
                .invoke()
                .function_name(function_name)
                .invocation_type(InvocationType::RequestResponse)
                .payload(Blob::new(payload))
                .send()
                .await
                .map_err(|e| UpstreamError::Invocation(DisplayErrorContext(&e).to_string()))?;

            if let Some(function_error) = output.function_error() {
                tracing::warn!(
                    function = %function_name,
                    function_error = %function_error,
                    "Remote function reported an error"
                );
            }

            Ok(output
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default())
        })
    }
}
