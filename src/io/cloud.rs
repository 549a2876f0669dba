use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure kinds for persistence operations.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CloudErrorKind {
    /// No client handle has been initialized
    ClientUnavailable,
    /// The remote service answered with an error response
    RemoteRejected,
    /// Transport, timeout or anything else the SDK reported
    Unknown,
}

impl fmt::Display for CloudErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudErrorKind::ClientUnavailable => write!(f, "client unavailable"),
            CloudErrorKind::RemoteRejected => write!(f, "remote rejected"),
            CloudErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Errors reported by a [`CloudClient`] operation
#[derive(Debug, Clone, Error)]
#[error("{operation} failed ({kind}): {message}")]
pub struct CloudError {
    pub kind: CloudErrorKind,
    pub operation: &'static str,
    pub message: String,
}

impl CloudError {
    pub fn new(kind: CloudErrorKind, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            message: message.into(),
        }
    }

    pub fn unavailable(operation: &'static str) -> Self {
        Self::new(
            CloudErrorKind::ClientUnavailable,
            operation,
            "client not initialized",
        )
    }

    pub fn rejected(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(CloudErrorKind::RemoteRejected, operation, message)
    }

    pub fn unknown(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(CloudErrorKind::Unknown, operation, message)
    }
}

/// One log-service event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Wall-clock time in epoch milliseconds
    pub timestamp_ms: i64,
    pub message: String,
}

impl LogEvent {
    /// Event stamped with the current wall-clock time
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            message: message.into(),
        }
    }
}

/// Capability handle over the object store and the log service.
///
/// Every call blocks until the remote operation returns or fails.
/// Implementations never retry on their own behalf.
pub trait CloudClient: fmt::Debug + Send + Sync {
    /// Store `body` under `bucket`/`key`, replacing any existing object
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), CloudError>;

    /// Create `stream` inside `group`; fails with `RemoteRejected` if it already exists
    fn create_log_stream(&self, group: &str, stream: &str) -> Result<(), CloudError>;

    /// Append a single event to an existing stream
    fn put_log_event(&self, group: &str, stream: &str, event: LogEvent) -> Result<(), CloudError>;
}
