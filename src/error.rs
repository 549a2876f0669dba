//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Fatal failures (client setup, settings, serialization) live here; non-fatal
//! persistence failures are carried by [`crate::io::CloudError`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to initialize cloud clients: {0}")]
    ClientSetup(String),

    #[error("Invalid setting: {key}={value}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("Missing setting: {key} (required when {requires} is set)")]
    MissingSetting {
        key: &'static str,
        requires: &'static str,
    },
}

impl Error {
    pub fn client_setup<E: std::fmt::Display>(e: E) -> Self {
        Error::ClientSetup(e.to_string())
    }
}
