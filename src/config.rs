use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::geolocate;

pub const DEVICE_PORT: u16 = 8008;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);
pub const SLEEP_BETWEEN_SCAN: Duration = Duration::from_secs(4);

/// Settings for one run, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub api_key: String,
    pub scan_only: bool,
    pub device_port: u16,
    pub request_timeout: Duration,
    pub scan_interval: Duration,
    pub max_attempts: Option<u32>,
    pub geolocate_url: String,
}

/// Optional overrides loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub device_port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
    pub scan_interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub geolocate_url: Option<String>,
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}

/// Reads the API key from the first line of the key file.
pub fn read_api_key(path: &Path) -> Result<String> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read the API key from {}", path.display()))?;
    let key = data.lines().next().unwrap_or_default().trim().to_string();
    ensure!(!key.is_empty(), "the key file {} is empty", path.display());
    Ok(key)
}

impl Config {
    /// Merges command-line values with file overrides. Flags win.
    pub fn resolve(
        host: String,
        scan_only: bool,
        api_key: String,
        file: FileConfig,
        max_attempts: Option<u32>,
    ) -> Config {
        Config {
            host,
            api_key,
            scan_only,
            device_port: file.device_port.unwrap_or(DEVICE_PORT),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(REQUEST_TIMEOUT),
            scan_interval: file
                .scan_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(SLEEP_BETWEEN_SCAN),
            max_attempts: max_attempts.or(file.max_attempts),
            geolocate_url: file
                .geolocate_url
                .unwrap_or_else(|| geolocate::DEFAULT_URL.to_string()),
        }
    }
}
