use clap::Parser;

use dataproc::Environment;

#[derive(Parser, Debug)]
#[command(
    name = "dataproc",
    version,
    about = "Portfolio Data Processing Application"
)]
pub struct CliArgs {
    /// Environment to run in
    #[arg(short, long, value_enum, default_value_t = Environment::Dev)]
    pub environment: Environment,

    /// Input data to process
    #[arg(short, long)]
    pub input: Option<String>,

    /// S3 bucket for data storage
    #[arg(long = "s3-bucket")]
    pub s3_bucket: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
