use dataproc::{
    CloudClient, CloudErrorKind, Environment, Error, InMemoryCloud, LogContext, LogTarget,
    ResultRecord, ResultStatus, RunRequest, result_key, run_pipeline,
};
use tracing::Level;

fn connect(cloud: &InMemoryCloud) -> impl FnOnce() -> dataproc::Result<Box<dyn CloudClient>> {
    let handle = cloud.clone();
    move || Ok(Box::new(handle) as Box<dyn CloudClient>)
}

fn request(environment: Environment, input: Option<&str>, bucket: Option<&str>) -> RunRequest {
    RunRequest {
        environment,
        input: input.map(str::to_string),
        bucket: bucket.map(str::to_string),
        log_target: None,
    }
}

#[test]
fn stores_one_object_under_environment_key() {
    let cloud = InMemoryCloud::new();
    let report = run_pipeline(
        &request(Environment::Staging, Some("data"), Some("bucket")),
        connect(&cloud),
    )
    .unwrap();

    assert_eq!(report.stored, Some(true));
    assert_eq!(report.object_key.as_deref(), Some("results/staging/output.txt"));
    assert_eq!(cloud.object_count(), 1);

    let body = cloud
        .object("bucket", &result_key(Environment::Staging))
        .unwrap();
    let stored: ResultRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        stored,
        ResultRecord {
            status: ResultStatus::Success,
            input: "data".into(),
            output: "Processed: data".into(),
            environment: "staging".into(),
        }
    );
    assert_eq!(report.result, Some(stored));
}

#[test]
fn object_failure_does_not_fail_the_run() {
    let cloud = InMemoryCloud::new().failing_objects(CloudErrorKind::RemoteRejected);
    let (logs_ctx, logs) = LogContext::capture(false);
    let _guard = logs_ctx.install();

    let report = run_pipeline(
        &request(Environment::Dev, Some("data"), Some("bucket")),
        connect(&cloud),
    )
    .unwrap();

    assert_eq!(report.stored, Some(false));
    assert!(report.result.is_some());
    assert!(logs.contains(Level::ERROR, "Failed to save to object store"));
}

#[test]
fn client_setup_failure_aborts() {
    let result = run_pipeline(
        &request(Environment::Prod, Some("data"), Some("bucket")),
        || Err(Error::ClientSetup("AccessDenied".into())),
    );
    assert!(matches!(result, Err(Error::ClientSetup(_))));
}

#[test]
fn missing_input_warns_but_still_connects_for_bucket() {
    let cloud = InMemoryCloud::new();
    let (logs_ctx, logs) = LogContext::capture(false);
    let _guard = logs_ctx.install();

    let report = run_pipeline(&request(Environment::Dev, None, Some("bucket")), connect(&cloud))
        .unwrap();

    assert_eq!(report.result, None);
    assert_eq!(report.stored, None);
    assert_eq!(cloud.calls(), 0);
    assert!(logs.contains(Level::WARN, "No input data provided"));
    assert!(logs.contains(Level::INFO, "Cloud clients initialized successfully"));
}

#[test]
fn log_target_receives_serialized_result() {
    let cloud = InMemoryCloud::new();
    let mut req = request(Environment::Prod, Some("data"), Some("bucket"));
    req.log_target = Some(LogTarget {
        group: "app".into(),
        stream: "runs".into(),
    });

    let report = run_pipeline(&req, connect(&cloud)).unwrap();

    assert_eq!(report.logged, Some(true));
    let events = cloud.log_events("app", "runs");
    assert_eq!(events.len(), 1);
    let logged: ResultRecord = serde_json::from_str(&events[0].message).unwrap();
    assert_eq!(logged.environment, "prod");
}

#[test]
fn log_target_is_skipped_without_clients() {
    let mut req = request(Environment::Dev, Some("data"), None);
    req.log_target = Some(LogTarget {
        group: "app".into(),
        stream: "runs".into(),
    });

    let report = run_pipeline(&req, || panic!("no bucket, no clients")).unwrap();
    assert_eq!(report.logged, None);
}

#[test]
fn empty_values_are_not_supplied() {
    let (logs_ctx, logs) = LogContext::capture(false);
    let _guard = logs_ctx.install();

    let report = run_pipeline(&request(Environment::Dev, Some(""), Some("")), || {
        panic!("empty bucket must not connect")
    })
    .unwrap();

    assert_eq!(report.result, None);
    assert_eq!(report.stored, None);
    assert_eq!(report.object_key, None);
    assert!(logs.contains(Level::WARN, "No input data provided"));
}

#[test]
fn empty_input_with_bucket_writes_nothing() {
    let cloud = InMemoryCloud::new();
    let report = run_pipeline(
        &request(Environment::Dev, Some(""), Some("bucket")),
        connect(&cloud),
    )
    .unwrap();

    assert_eq!(report.result, None);
    assert_eq!(report.stored, None);
    assert_eq!(cloud.calls(), 0);
}

#[test]
fn log_failure_does_not_fail_the_run() {
    let cloud = InMemoryCloud::new().failing_logs(CloudErrorKind::Unknown);
    let (logs_ctx, logs) = LogContext::capture(false);
    let _guard = logs_ctx.install();
    let mut req = request(Environment::Staging, Some("data"), Some("bucket"));
    req.log_target = Some(LogTarget {
        group: "app".into(),
        stream: "runs".into(),
    });

    let report = run_pipeline(&req, connect(&cloud)).unwrap();

    assert_eq!(report.stored, Some(true));
    assert_eq!(report.logged, Some(false));
    assert!(report.result.is_some());
    assert!(cloud.log_events("app", "runs").is_empty());
    assert!(logs.contains(Level::ERROR, "Failed to log to log service"));
}
