//! Runtime settings.
//!
//! Settings come from `BIKEBOARD_*` environment variables; anything unset
//! falls back to its default. Values are validated once at startup.
//!
//! | Variable             | Default          |
//! |----------------------|------------------|
//! | `BIKEBOARD_DATA`     | `all_data.csv`   |
//! | `BIKEBOARD_ADDR`     | `127.0.0.1:8501` |
//! | `BIKEBOARD_CLUSTERS` | `3`              |
//! | `BIKEBOARD_SEED`     | unset (random)   |
//! | `BIKEBOARD_LOG`      | `info`           |
//! | `BIKEBOARD_OUTPUT`   | unset (serve)    |

use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_CLUSTER_COUNT, DEFAULT_DATA_FILE};
use crate::data::KMeansConfig;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

const ENV_PREFIX: &str = "BIKEBOARD_";

/// Invalid configuration value
#[derive(Error, Debug, PartialEq)]
#[error("Invalid value for {var}: {message}")]
pub struct SettingsError {
    pub var: String,
    pub message: String,
}

impl SettingsError {
    fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            var: format!("{ENV_PREFIX}{key}"),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSettings {
    /// CSV dataset location
    pub data_path: PathBuf,
    /// Address the dashboard server binds to
    pub bind_addr: String,
    /// Number of k-means clusters
    pub clusters: usize,
    /// Fixed k-means seed for reproducible clustering
    pub seed: Option<u64>,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Render the page to this file and exit instead of serving
    pub output: Option<PathBuf>,
    /// `BIKEBOARD_*` names that matched no setting; logged once logging is up
    #[serde(skip)]
    pub ignored: Vec<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            clusters: DEFAULT_CLUSTER_COUNT,
            seed: None,
            log_level: "info".to_string(),
            output: None,
            ignored: Vec::new(),
        }
    }
}

impl DashboardSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_vars(std::env::vars())
    }

    /// Read settings from `(name, value)` pairs; unrelated names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();

        for (name, value) in vars {
            let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "DATA" => settings.data_path = PathBuf::from(value),
                "ADDR" => settings.bind_addr = parse_bind_addr(key, value)?,
                "CLUSTERS" => {
                    let k: usize = value.parse().map_err(|_| {
                        SettingsError::new(key, format!("`{value}` is not a number"))
                    })?;
                    if k == 0 {
                        return Err(SettingsError::new(key, "must be at least 1"));
                    }
                    settings.clusters = k;
                }
                "SEED" => {
                    let seed = value
                        .parse()
                        .map_err(|_| SettingsError::new(key, format!("`{value}` is not a u64")))?;
                    settings.seed = Some(seed);
                }
                "LOG" => settings.log_level = value.to_string(),
                "OUTPUT" => settings.output = Some(PathBuf::from(value)),
                _ => settings.ignored.push(name.as_ref().to_string()),
            }
        }

        Ok(settings)
    }

    /// Clustering parameters derived from these settings.
    pub fn kmeans_config(&self) -> KMeansConfig {
        KMeansConfig::new(self.clusters).with_seed(self.seed)
    }
}

/// Accept `host:port` with a numeric port.
fn parse_bind_addr(key: &str, value: &str) -> Result<String, SettingsError> {
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| SettingsError::new(key, format!("`{value}` is not host:port")))?;
    if host.is_empty() {
        return Err(SettingsError::new(key, "missing host"));
    }
    port.parse::<u16>()
        .map_err(|_| SettingsError::new(key, format!("`{port}` is not a port")))?;
    Ok(value.to_string())
}
