//! High-level library API: one linear pipeline run, from request to report.
//! The CLI is a thin wrapper over [`run_pipeline`]; embedders can call it
//! directly with their own [`CloudClient`] constructor.
use tracing::{info, warn};

use crate::config::LogTarget;
use crate::core::processor::Processor;
use crate::error::Result;
use crate::io::CloudClient;
use crate::types::{Environment, ResultRecord};

/// Everything one run needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub environment: Environment,
    pub input: Option<String>,
    pub bucket: Option<String>,
    pub log_target: Option<LogTarget>,
}

/// What one run did. `None` means the step was not attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub result: Option<ResultRecord>,
    pub object_key: Option<String>,
    pub stored: Option<bool>,
    pub logged: Option<bool>,
}

/// Object key for an environment's result: `results/<environment>/output.txt`
pub fn result_key(environment: Environment) -> String {
    format!("results/{}/output.txt", environment)
}

/// Stable payload for a result record: pretty-printed JSON
pub fn encode_result(record: &ResultRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Run the pipeline once.
///
/// Clients are only constructed when a non-empty bucket is given, and a construction
/// failure aborts the run. Write failures are logged and reported through
/// [`RunReport`] but never fail the run.
pub fn run_pipeline<F>(request: &RunRequest, connect: F) -> Result<RunReport>
where
    F: FnOnce() -> Result<Box<dyn CloudClient>>,
{
    let mut report = RunReport::default();
    let mut processor = Processor::new(request.environment);

    // Empty values count as not supplied
    let bucket = request.bucket.as_deref().filter(|b| !b.is_empty());
    let input = request.input.as_deref().filter(|i| !i.is_empty());

    if bucket.is_some() {
        processor.initialize_clients_with(connect)?;
    }

    match input {
        Some(input) => {
            let record = processor.transform(input);
            let payload = encode_result(&record)?;
            info!("Processing result: {:?}", record);

            if let Some(bucket) = bucket {
                let key = result_key(request.environment);
                let stored = processor.write_object(bucket, &key, payload.as_bytes());
                if !stored {
                    warn!("Result was not stored; continuing");
                }
                report.object_key = Some(key);
                report.stored = Some(stored);
            }

            if let Some(target) = &request.log_target {
                if processor.has_clients() {
                    report.logged =
                        Some(processor.write_log_event(&target.group, &target.stream, &payload));
                }
            }

            report.result = Some(record);
        }
        None => {
            warn!("No input data provided. Use --input to specify data to process.");
        }
    }

    Ok(report)
}
