//! I/O layer for the external services dataproc writes to.
//! Provides the `cloud` capability trait and error kinds, the `aws` SDK-backed
//! client, and an in-`memory` client for tests and dry runs.
pub mod cloud;
pub use cloud::{CloudClient, CloudError, CloudErrorKind, LogEvent};

pub mod aws;
pub use aws::AwsCloudClient;

pub mod memory;
pub use memory::InMemoryCloud;
