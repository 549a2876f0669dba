//! Command Line Interface (CLI) layer for dataproc.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that installs the logging context,
//! loads settings and hands the run to `dataproc::run_pipeline`.
//!
//! If you are embedding dataproc into another application, prefer the
//! library API (`dataproc::api`) over calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
