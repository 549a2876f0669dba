//! dataproc CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! pipeline, and exit with 0 on success or 1 on failure. Bad arguments exit
//! through clap with its usage error code.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
