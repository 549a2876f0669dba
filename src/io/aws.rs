//! AWS-backed [`CloudClient`]: S3 for objects, CloudWatch Logs for log events.
//!
//! The SDK is async while the rest of dataproc is synchronous, so the client
//! owns a current-thread tokio runtime and blocks on every request. Credentials
//! come from the SDK's default provider chain; nothing here touches them.
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::cloud::{CloudClient, CloudError, LogEvent};
use crate::config::AwsSettings;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct AwsCloudClient {
    runtime: Runtime,
    s3: aws_sdk_s3::Client,
    logs: aws_sdk_cloudwatchlogs::Client,
}

impl AwsCloudClient {
    /// Resolve SDK configuration and build both service clients.
    ///
    /// Fails when the runtime cannot be created or no region resolves from
    /// `settings` or the SDK's provider chain.
    pub fn connect(settings: &AwsSettings) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::client_setup)?;

        let sdk_config = runtime.block_on(load_sdk_config(settings));
        let Some(region) = sdk_config.region() else {
            return Err(Error::ClientSetup(
                "no AWS region configured; set AWS_REGION or DATAPROC_AWS_REGION".to_string(),
            ));
        };
        debug!(
            region = %region,
            endpoint = ?settings.endpoint_url,
            force_path_style = settings.force_path_style,
            "Resolved AWS SDK configuration"
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            logs: aws_sdk_cloudwatchlogs::Client::new(&sdk_config),
            runtime,
        })
    }
}

async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

/// Map an SDK failure onto the closed kind set: service error responses are
/// `RemoteRejected`, everything else (dispatch, timeout, construction) is `Unknown`.
fn classify<E, R>(operation: &'static str, err: SdkError<E, R>) -> CloudError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            CloudError::rejected(
                operation,
                format!(
                    "{}: {}",
                    inner.code().unwrap_or("Unknown"),
                    inner.message().unwrap_or_default()
                ),
            )
        }
        _ => CloudError::unknown(operation, DisplayErrorContext(&err).to_string()),
    }
}

impl CloudClient for AwsCloudClient {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> std::result::Result<(), CloudError> {
        debug!(bucket, key, bytes = body.len(), "PutObject");
        self.runtime
            .block_on(
                self.s3
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(body))
                    .send(),
            )
            .map(|_| ())
            .map_err(|e| classify("put_object", e))
    }

    fn create_log_stream(&self, group: &str, stream: &str) -> std::result::Result<(), CloudError> {
        debug!(group, stream, "CreateLogStream");
        self.runtime
            .block_on(
                self.logs
                    .create_log_stream()
                    .log_group_name(group)
                    .log_stream_name(stream)
                    .send(),
            )
            .map(|_| ())
            .map_err(|e| classify("create_log_stream", e))
    }

    fn put_log_event(
        &self,
        group: &str,
        stream: &str,
        event: LogEvent,
    ) -> std::result::Result<(), CloudError> {
        debug!(group, stream, timestamp_ms = event.timestamp_ms, "PutLogEvents");
        let event = InputLogEvent::builder()
            .timestamp(event.timestamp_ms)
            .message(event.message)
            .build()
            .map_err(|e| CloudError::unknown("put_log_event", e.to_string()))?;

        self.runtime
            .block_on(
                self.logs
                    .put_log_events()
                    .log_group_name(group)
                    .log_stream_name(stream)
                    .log_events(event)
                    .send(),
            )
            .map(|_| ())
            .map_err(|e| classify("put_log_event", e))
    }
}
