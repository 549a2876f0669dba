//! In-memory [`CloudClient`] used by tests and local dry runs.
//!
//! Mirrors the service semantics the processor depends on: creating a stream
//! twice is rejected, and events can only be appended to a stream that exists.
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::cloud::{CloudClient, CloudError, CloudErrorKind, LogEvent};

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<(String, String), Vec<u8>>,
    streams: BTreeMap<(String, String), Vec<LogEvent>>,
    fail_objects: Option<CloudErrorKind>,
    fail_logs: Option<CloudErrorKind>,
    calls: usize,
}

/// Shared handle; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCloud {
    state: Arc<Mutex<State>>,
}

impl InMemoryCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `put_object` fail with `kind`
    pub fn failing_objects(self, kind: CloudErrorKind) -> Self {
        self.lock().fail_objects = Some(kind);
        self
    }

    /// Make every `put_log_event` fail with `kind`
    pub fn failing_logs(self, kind: CloudErrorKind) -> Self {
        self.lock().fail_logs = Some(kind);
        self
    }

    /// Pre-create a stream, as if an earlier run had done so
    pub fn with_stream(self, group: &str, stream: &str) -> Self {
        self.lock()
            .streams
            .entry((group.to_string(), stream.to_string()))
            .or_default();
        self
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    pub fn log_events(&self, group: &str, stream: &str) -> Vec<LogEvent> {
        self.lock()
            .streams
            .get(&(group.to_string(), stream.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of client calls observed
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected(kind: CloudErrorKind, operation: &'static str) -> CloudError {
    CloudError::new(kind, operation, "injected failure")
}

impl CloudClient for InMemoryCloud {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), CloudError> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(kind) = state.fail_objects {
            return Err(injected(kind, "put_object"));
        }
        state
            .objects
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }

    fn create_log_stream(&self, group: &str, stream: &str) -> Result<(), CloudError> {
        let mut state = self.lock();
        state.calls += 1;
        let id = (group.to_string(), stream.to_string());
        if state.streams.contains_key(&id) {
            return Err(CloudError::rejected(
                "create_log_stream",
                format!("ResourceAlreadyExistsException: {group}/{stream}"),
            ));
        }
        state.streams.insert(id, Vec::new());
        Ok(())
    }

    fn put_log_event(&self, group: &str, stream: &str, event: LogEvent) -> Result<(), CloudError> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(kind) = state.fail_logs {
            return Err(injected(kind, "put_log_event"));
        }
        match state
            .streams
            .get_mut(&(group.to_string(), stream.to_string()))
        {
            Some(events) => {
                events.push(event);
                Ok(())
            }
            None => Err(CloudError::rejected(
                "put_log_event",
                format!("ResourceNotFoundException: {group}/{stream}"),
            )),
        }
    }
}
