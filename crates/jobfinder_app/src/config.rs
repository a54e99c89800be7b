//! Runtime configuration: an optional RON file plus command-line overrides.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use jobfinder_engine::{AnalysisSettings, DEFAULT_ENDPOINT};
use jobfinder_logging::jf_info;
use serde::Deserialize;

use crate::cli::Cli;
use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "jobfinder.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Full URL of the Analysis Service's analyze operation.
    pub service_url: String,
    pub connect_timeout_secs: u64,
    /// No client-side request timeout unless set.
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = AnalysisSettings::default();
        Self {
            service_url: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: engine.connect_timeout.as_secs(),
            request_timeout_secs: None,
            max_response_bytes: engine.max_response_bytes,
            log: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `./jobfinder.ron` when no path is given. Only the
    /// implicit default file may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };

        let config: AppConfig = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        jf_info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.service_url {
            self.service_url = url.clone();
        }
        if let Some(secs) = cli.request_timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            endpoint: self.service_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }
}
