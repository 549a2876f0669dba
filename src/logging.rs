//! Explicitly constructed logging context.
//!
//! A [`LogContext`] builds a subscriber and installs it as the *thread's*
//! default dispatcher for as long as the returned guard lives. Nothing is set
//! globally, so each test can capture its own log output.
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber, field::Visit};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt as tfmt};

/// SDK internals stay at `info` even in verbose mode.
const QUIET_TARGETS: [&str; 6] = [
    "aws_config=info",
    "aws_smithy_runtime=info",
    "aws_smithy_runtime_api=info",
    "aws_sdk_s3=info",
    "aws_sdk_cloudwatchlogs=info",
    "hyper_util=info",
];

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub timestamp: String,
    pub message: String,
    pub target: String,
}

impl LogEntry {
    pub fn new(level: Level, message: String, target: String) -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339();
        Self {
            level,
            timestamp,
            message,
            target,
        }
    }
}

/// Captured entries, shared between a capturing context and the test reading them
#[derive(Clone, Debug, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogBuffer {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True if any entry at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    fn push(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[derive(Clone, Debug)]
enum Sink {
    Console,
    Capture(LogBuffer),
}

#[derive(Clone, Debug)]
pub struct LogContext {
    verbose: bool,
    sink: Sink,
}

impl LogContext {
    /// Human-readable lines on stdout; `RUST_LOG` overrides the default level.
    pub fn console(verbose: bool) -> Self {
        Self {
            verbose,
            sink: Sink::Console,
        }
    }

    /// Record every event into a fresh [`LogBuffer`] instead of printing it.
    pub fn capture(verbose: bool) -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        let ctx = Self {
            verbose,
            sink: Sink::Capture(buffer.clone()),
        };
        (ctx, buffer)
    }

    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }

    pub fn dispatch(&self) -> Dispatch {
        match &self.sink {
            Sink::Console => {
                let mut filter = EnvFilter::builder()
                    .with_default_directive(self.level().into())
                    .from_env_lossy();
                for directive in QUIET_TARGETS {
                    if let Ok(d) = directive.parse::<Directive>() {
                        filter = filter.add_directive(d);
                    }
                }
                let subscriber = Registry::default().with(filter).with(
                    tfmt::layer()
                        .with_writer(std::io::stdout)
                        .with_target(true)
                        .with_ansi(false),
                );
                Dispatch::new(subscriber)
            }
            Sink::Capture(buffer) => {
                let subscriber = Registry::default()
                    .with(self.level())
                    .with(CaptureLayer::new(buffer.clone()));
                Dispatch::new(subscriber)
            }
        }
    }

    /// Install as the current thread's default until the guard drops
    pub fn install(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch())
    }
}

pub struct CaptureLayer {
    buffer: LogBuffer,
}

impl CaptureLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
            fields: Vec::new(),
        }
    }

    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::new();
        event.record(&mut visitor);
        let message = visitor.finish();

        self.buffer.push(LogEntry::new(
            *metadata.level(),
            message,
            metadata.target().to_string(),
        ));
    }
}
