use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Settings error: {0}")]
    Settings(#[source] dataproc::Error),

    #[error("Pipeline failed: {0}")]
    Pipeline(#[from] dataproc::Error),
}
