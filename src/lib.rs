#![doc = r#"
dataproc — a template data processing application.

Takes one input string, wraps it in a [`ResultRecord`], and optionally stores the
record in S3 and appends it as an event to a CloudWatch Logs stream. The crate
powers the `dataproc` CLI and can be embedded in other Rust applications.

Quick start: transform without any cloud access
-----------------------------------------------
```rust
use dataproc::{Environment, Processor};

let processor = Processor::new(Environment::Dev);
let record = processor.transform("test_input");
assert_eq!(record.output, "Processed: test_input");
assert_eq!(record.environment, "dev");
```

Run the full pipeline against an in-memory client
-------------------------------------------------
```rust
use dataproc::{run_pipeline, result_key, CloudClient, Environment, InMemoryCloud, RunRequest};

fn main() -> dataproc::Result<()> {
    let cloud = InMemoryCloud::new();
    let handle = cloud.clone();
    let request = RunRequest {
        environment: Environment::Staging,
        input: Some("data".to_string()),
        bucket: Some("bucket".to_string()),
        log_target: None,
    };

    let report = run_pipeline(&request, || Ok(Box::new(handle) as Box<dyn CloudClient>))?;
    assert_eq!(report.stored, Some(true));
    assert!(cloud.object("bucket", &result_key(Environment::Staging)).is_some());
    Ok(())
}
```

Error handling
--------------
Fatal failures (client setup, invalid settings) surface as [`Error`]. Write
failures never do: `write_object`/`write_log_event` return `false`, and the
`try_*` variants return a [`CloudError`] whose [`CloudErrorKind`] tells
"not initialized" apart from "service rejected" and everything else.

Useful modules
--------------
- [`api`] — the pipeline entry point.
- [`core`] — the [`Processor`].
- [`io`] — the [`CloudClient`] trait, AWS and in-memory clients.
- [`config`] — settings read from the environment.
- [`logging`] — explicitly constructed logging contexts.
"#]

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod types;

// Curated public API surface
pub use config::{AwsSettings, LogTarget, Settings};
pub use core::processor::Processor;
pub use error::{Error, Result};
pub use types::{Environment, ResultRecord, ResultStatus};

pub use io::{AwsCloudClient, CloudClient, CloudError, CloudErrorKind, InMemoryCloud, LogEvent};
pub use logging::{LogBuffer, LogContext, LogEntry};

pub use api::{RunReport, RunRequest, encode_result, result_key, run_pipeline};
