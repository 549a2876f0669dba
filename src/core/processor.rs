use tracing::{debug, error, info};

use crate::config::AwsSettings;
use crate::error::Result;
use crate::io::{AwsCloudClient, CloudClient, CloudError, LogEvent};
use crate::types::{Environment, ResultRecord, ResultStatus};

/// Processor bound to one environment.
///
/// Owns the cloud client handle once `initialize_clients` succeeds; until then
/// every persistence call reports `ClientUnavailable` without touching the network.
#[derive(Debug)]
pub struct Processor {
    environment: Environment,
    client: Option<Box<dyn CloudClient>>,
}

impl Processor {
    pub fn new(environment: Environment) -> Self {
        info!("Initializing processor for environment: {}", environment);
        Self {
            environment,
            client: None,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn has_clients(&self) -> bool {
        self.client.is_some()
    }

    /// Acquire the AWS-backed client through the SDK's ambient configuration.
    pub fn initialize_clients(&mut self, settings: &AwsSettings) -> Result<()> {
        self.initialize_clients_with(|| {
            AwsCloudClient::connect(settings).map(|c| Box::new(c) as Box<dyn CloudClient>)
        })
    }

    /// Same as [`Processor::initialize_clients`] with an injectable constructor.
    /// Construction failures are logged and propagated; the stored handle is untouched.
    pub fn initialize_clients_with<F>(&mut self, connect: F) -> Result<()>
    where
        F: FnOnce() -> Result<Box<dyn CloudClient>>,
    {
        match connect() {
            Ok(client) => {
                self.client = Some(client);
                info!("Cloud clients initialized successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize cloud clients: {}", e);
                Err(e)
            }
        }
    }

    pub fn transform(&self, input: &str) -> ResultRecord {
        info!("Processing data: {}", input);

        let record = ResultRecord {
            status: ResultStatus::Success,
            input: input.to_string(),
            output: format!("Processed: {input}"),
            environment: self.environment.to_string(),
        };

        info!("Data processing completed successfully");
        record
    }

    pub fn try_write_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
    ) -> std::result::Result<(), CloudError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CloudError::unavailable("put_object"))?;
        client.put_object(bucket, key, data.to_vec())
    }

    /// Store `data` at `bucket`/`key`. Failures are logged, never propagated.
    pub fn write_object(&self, bucket: &str, key: &str, data: &[u8]) -> bool {
        match self.try_write_object(bucket, key, data) {
            Ok(()) => {
                info!("Successfully saved data to s3://{}/{}", bucket, key);
                true
            }
            Err(e) => {
                error!(kind = %e.kind, "Failed to save to object store: {}", e);
                false
            }
        }
    }

    pub fn try_write_log_event(
        &self,
        group: &str,
        stream: &str,
        message: &str,
    ) -> std::result::Result<(), CloudError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CloudError::unavailable("put_log_event"))?;

        // An existing stream is the common case
        if let Err(e) = client.create_log_stream(group, stream) {
            debug!("Log stream not created, continuing: {}", e);
        }

        client.put_log_event(group, stream, LogEvent::now(message))
    }

    /// Append one timestamped event to `group`/`stream`, creating the stream
    /// if needed. Failures are logged, never propagated.
    pub fn write_log_event(&self, group: &str, stream: &str, message: &str) -> bool {
        match self.try_write_log_event(group, stream, message) {
            Ok(()) => {
                info!("Successfully logged to log service: {}/{}", group, stream);
                true
            }
            Err(e) => {
                error!(kind = %e.kind, "Failed to log to log service: {}", e);
                false
            }
        }
    }
}
