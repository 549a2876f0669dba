use std::error::Error as _;
use std::process::ExitCode;

use tracing::{debug, error, info, warn};

use dataproc::{
    AwsCloudClient, CloudClient, LogContext, RunReport, RunRequest, Settings, run_pipeline,
};

use super::args::CliArgs;
use super::errors::AppError;

fn execute(args: CliArgs) -> Result<RunReport, AppError> {
    let wants_bucket = args.s3_bucket.as_deref().is_some_and(|b| !b.is_empty());
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        // Settings only feed the cloud clients, which need a bucket
        Err(e) if !wants_bucket => {
            warn!("Ignoring settings, no bucket given: {}", e);
            Settings::default()
        }
        Err(e) => return Err(AppError::Settings(e)),
    };
    debug!(?settings, "Loaded settings");

    let request = RunRequest {
        environment: args.environment,
        input: args.input,
        bucket: args.s3_bucket,
        log_target: settings.log_target.clone(),
    };

    let report = run_pipeline(&request, || {
        AwsCloudClient::connect(&settings.aws).map(|c| Box::new(c) as Box<dyn CloudClient>)
    })?;
    Ok(report)
}

pub fn run(args: CliArgs) -> ExitCode {
    let logging = LogContext::console(args.verbose);
    let _guard = logging.install();

    info!("Starting Portfolio Data Processing Application");
    info!("Environment: {}", args.environment);

    match execute(args) {
        Ok(report) => {
            debug!(?report, "Run finished");
            info!("Application completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let mut chain = Vec::new();
            let mut source = e.source();
            while let Some(cause) = source {
                chain.push(cause.to_string());
                source = cause.source();
            }
            error!(error = ?e, causes = ?chain, "Application failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
