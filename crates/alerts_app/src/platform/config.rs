use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alerts_core::DEFAULT_RESOURCE_BASE;
use alerts_engine::{ApiEndpoints, FetchSettings, DEFAULT_API_BASE};
use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use url::Url;

use super::cli::Args;
use super::logging::LogDestination;

/// Read when `--config` is not given; silently skipped if absent.
pub const DEFAULT_CONFIG_FILE: &str = "alerts.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub resource_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub export_dir: PathBuf,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            resource_base: DEFAULT_RESOURCE_BASE.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            export_dir: PathBuf::from("exports"),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when no path is given.
    ///
    /// Only the implicit default file may be missing.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Command-line flags win over the file.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(api_base) = &args.api_base {
            self.api_base = api_base.clone();
        }
        if let Some(resource_base) = &args.resource_base {
            self.resource_base = resource_base.clone();
        }
        if let Some(level) = &args.log {
            self.log.level = level.clone();
        }
    }

    /// Unknown names fall back to `info`.
    pub fn log_level(&self) -> LevelFilter {
        alerts_logging::parse_level(&self.log.level).unwrap_or(LevelFilter::Info)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn endpoints(&self) -> anyhow::Result<ApiEndpoints> {
        ApiEndpoints::parse(&self.api_base)
            .with_context(|| format!("invalid api base {:?}", self.api_base))
    }

    /// Resource names are joined onto this URL, so its path always ends in `/`.
    pub fn resource_base_url(&self) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.resource_base)
            .with_context(|| format!("invalid resource base {:?}", self.resource_base))?;
        if url.cannot_be_a_base() {
            anyhow::bail!("resource base {:?} cannot hold paths", self.resource_base);
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
