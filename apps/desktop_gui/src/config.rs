//! Deployment configuration: where the prediction service lives.
//!
//! Layers, lowest to highest: compiled default (or `CROP_ADVISOR_SERVICE_URL`
//! at build time), `crop_advisor.toml`, `APP__*` environment variables,
//! command-line flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::Parser;
use client_core::{EndpointError, ServiceEndpoint, DEFAULT_PREDICT_PATH};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "crop_advisor.toml";
const FALLBACK_SERVICE_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug, Default)]
#[command(name = "crop_advisor", about = "Crop recommendation desktop client")]
pub struct CliArgs {
    /// Base URL of the prediction service.
    #[arg(long)]
    pub service_url: Option<String>,
    /// Path of the prediction route, relative to the service URL.
    #[arg(long)]
    pub predict_path: Option<String>,
    /// Configuration file. Defaults to ./crop_advisor.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub predict_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: option_env!("CROP_ADVISOR_SERVICE_URL")
                .unwrap_or(FALLBACK_SERVICE_URL)
                .to_string(),
            predict_path: DEFAULT_PREDICT_PATH.to_string(),
        }
    }
}

impl Settings {
    pub fn endpoint(&self) -> Result<ServiceEndpoint, EndpointError> {
        ServiceEndpoint::parse(&self.service_url, &self.predict_path)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    service_url: Option<String>,
    predict_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn load_settings(args: &CliArgs) -> Result<Settings, ConfigError> {
    load_settings_with(args, |name| std::env::var(name).ok())
}

fn load_settings_with(
    args: &CliArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let (path, required) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(file_cfg) = read_file_settings(&path, required)? {
        if let Some(v) = file_cfg.service_url {
            settings.service_url = v;
        }
        if let Some(v) = file_cfg.predict_path {
            settings.predict_path = v;
        }
    }

    let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());
    if let Some(v) = non_empty("APP__SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = non_empty("APP__PREDICT_PATH") {
        settings.predict_path = v;
    }

    if let Some(v) = &args.service_url {
        settings.service_url = v.clone();
    }
    if let Some(v) = &args.predict_path {
        settings.predict_path = v.clone();
    }

    Ok(settings)
}

fn read_file_settings(path: &Path, required: bool) -> Result<Option<FileSettings>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str::<FileSettings>(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
