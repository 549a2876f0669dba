//! Ambient settings read from the process environment (and an optional `.env`).
//!
//! | variable                        | meaning                                     |
//! |---------------------------------|---------------------------------------------|
//! | `DATAPROC_AWS_REGION`           | region override; otherwise the SDK chain    |
//! | `DATAPROC_AWS_ENDPOINT_URL`     | endpoint override, e.g. LocalStack          |
//! | `DATAPROC_S3_FORCE_PATH_STYLE`  | `true`/`false`, default `false`             |
//! | `DATAPROC_LOG_GROUP`            | log group for the per-run log event         |
//! | `DATAPROC_LOG_STREAM`           | log stream; required with a log group       |
//!
//! A malformed setting is fatal only when a bucket is given; otherwise the
//! CLI warns and runs with [`Settings::default`].
use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// Log group/stream pair receiving one event per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTarget {
    pub group: String,
    pub stream: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub aws: AwsSettings,
    pub log_target: Option<LogTarget>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let force_path_style = match get("DATAPROC_S3_FORCE_PATH_STYLE") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|_| Error::InvalidSetting {
                    key: "DATAPROC_S3_FORCE_PATH_STYLE",
                    value: raw,
                })?,
            None => false,
        };

        let log_target = match (get("DATAPROC_LOG_GROUP"), get("DATAPROC_LOG_STREAM")) {
            (Some(group), Some(stream)) => Some(LogTarget { group, stream }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(Error::MissingSetting {
                    key: "DATAPROC_LOG_STREAM",
                    requires: "DATAPROC_LOG_GROUP",
                });
            }
            (None, Some(_)) => {
                return Err(Error::MissingSetting {
                    key: "DATAPROC_LOG_GROUP",
                    requires: "DATAPROC_LOG_STREAM",
                });
            }
        };

        Ok(Self {
            aws: AwsSettings {
                region: get("DATAPROC_AWS_REGION"),
                endpoint_url: get("DATAPROC_AWS_ENDPOINT_URL"),
                force_path_style,
            },
            log_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_aws_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATAPROC_AWS_REGION", "eu-west-1"),
            ("DATAPROC_AWS_ENDPOINT_URL", "http://localhost:4566"),
            ("DATAPROC_S3_FORCE_PATH_STYLE", "true"),
        ]))
        .unwrap();
        assert_eq!(settings.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            settings.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert!(settings.aws.force_path_style);
    }

    #[test]
    fn rejects_bad_bool() {
        let err = Settings::from_lookup(lookup(&[("DATAPROC_S3_FORCE_PATH_STYLE", "yes")]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting {
                key: "DATAPROC_S3_FORCE_PATH_STYLE",
                ..
            }
        ));
    }

    #[test]
    fn log_target_needs_both_halves() {
        let err = Settings::from_lookup(lookup(&[("DATAPROC_LOG_GROUP", "app")])).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSetting {
                key: "DATAPROC_LOG_STREAM",
                ..
            }
        ));

        let settings = Settings::from_lookup(lookup(&[
            ("DATAPROC_LOG_GROUP", "app"),
            ("DATAPROC_LOG_STREAM", "runs"),
        ]))
        .unwrap();
        assert_eq!(
            settings.log_target,
            Some(LogTarget {
                group: "app".into(),
                stream: "runs".into()
            })
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let settings = Settings::from_lookup(lookup(&[("DATAPROC_AWS_REGION", "  ")])).unwrap();
        assert_eq!(settings.aws.region, None);
    }
}
